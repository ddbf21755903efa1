// Movable capability
//
// Everything an actuator may push around implements `Movable`. Actuators only
// ever talk to this trait; they never reach into a character's fields.

use glam::{Quat, Vec3};

use crate::engine::physics::{PhysicsWorld, RigidBodyHandle};

/// How an external force combines with the current velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Replace the velocity outright
    Override,
    /// Add to the velocity
    Additive,
}

impl ForceMode {
    pub fn from_override_flag(override_velocity: bool) -> Self {
        if override_velocity {
            Self::Override
        } else {
            Self::Additive
        }
    }

    /// Combine `force` with `velocity`
    pub fn compose(self, velocity: Vec3, force: Vec3) -> Vec3 {
        match self {
            Self::Override => force,
            Self::Additive => velocity + force,
        }
    }
}

/// Identity of a movable within one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetId {
    Character,
    Prop(RigidBodyHandle),
}

/// Capability shared by the character and physics props
pub trait Movable {
    fn position(&self) -> Vec3;

    fn velocity(&self) -> Vec3;

    fn apply_force(&mut self, force: Vec3, mode: ForceMode);

    /// Re-arm whatever per-landing state the target has (jump count)
    fn reset_state(&mut self);

    /// Place the target at `position`, optionally re-orienting it
    fn teleport(&mut self, position: Vec3, rotation: Option<Quat>);
}

/// A dynamic rigid body in the physics world, borrowed as a `Movable`
pub struct PropBody<'a> {
    world: &'a mut PhysicsWorld,
    handle: RigidBodyHandle,
}

impl<'a> PropBody<'a> {
    pub fn new(world: &'a mut PhysicsWorld, handle: RigidBodyHandle) -> Self {
        Self { world, handle }
    }
}

impl Movable for PropBody<'_> {
    fn position(&self) -> Vec3 {
        self.world.body_position(self.handle).unwrap_or_default()
    }

    fn velocity(&self) -> Vec3 {
        self.world.body_velocity(self.handle).unwrap_or_default()
    }

    fn apply_force(&mut self, force: Vec3, mode: ForceMode) {
        let velocity = mode.compose(self.velocity(), force);
        self.world.set_body_velocity(self.handle, velocity);
    }

    fn reset_state(&mut self) {}

    fn teleport(&mut self, position: Vec3, rotation: Option<Quat>) {
        self.world.teleport_body(self.handle, position, rotation);
    }
}
