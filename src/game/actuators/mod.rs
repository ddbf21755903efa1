// Environmental actuators
//
// Trigger volumes that push movables around: launch pads, push zones, vortex
// fields and respawn zones. Each tick the set tests every movable against
// every volume and dispatches enter/stay/exit. Actuators only see the
// `Movable` capability, never the concrete character.
//
// Enter fires on the first overlapping tick, stay on every overlapping tick
// (the first one included) and exit on the first tick without overlap.

pub mod launch_pad;
pub mod push_zone;
pub mod respawn;
pub mod vortex;

use std::any::Any;
use std::collections::HashSet;

use glam::Vec3;
use rapier3d::parry::query::PointQuery;
use rapier3d::prelude::{Isometry, Point, Real, SharedShape};

use crate::engine::game_loop::SimClock;
use crate::game::movable::{Movable, TargetId};
use crate::game::scheduler::{DeferredAction, DeferredQueue};

pub use launch_pad::LaunchPad;
pub use push_zone::{ExitBehavior, PushZone};
pub use respawn::{RespawnRequest, RespawnZone};
pub use vortex::Vortex;

/// Trigger shape placed in the world
#[derive(Clone)]
pub struct Volume {
    shape: SharedShape,
    center: Vec3,
}

impl Volume {
    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            shape: SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z),
            center,
        }
    }

    pub fn sphere(center: Vec3, radius: Real) -> Self {
        Self {
            shape: SharedShape::ball(radius),
            center,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Whether `point` lies inside the volume (boundary included)
    pub fn contains(&self, point: Vec3) -> bool {
        let isometry = Isometry::translation(self.center.x, self.center.y, self.center.z);
        self.shape
            .contains_point(&isometry, &Point::new(point.x, point.y, point.z))
    }
}

impl std::fmt::Debug for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Volume")
            .field("shape", &self.shape.shape_type())
            .field("center", &self.center)
            .finish()
    }
}

/// What an actuator callback may touch besides its target
pub struct ActuatorContext<'a> {
    pub clock: SimClock,
    pub deferred: &'a mut DeferredQueue<DeferredAction>,
}

/// A trigger volume reacting to movables
pub trait Actuator: Any {
    fn name(&self) -> &str;

    fn volume(&self) -> &Volume;

    fn on_enter(&mut self, _id: TargetId, _target: &mut dyn Movable, _ctx: &mut ActuatorContext) {}

    fn on_stay(&mut self, _id: TargetId, _target: &mut dyn Movable, _ctx: &mut ActuatorContext) {}

    fn on_exit(&mut self, _id: TargetId, _target: &mut dyn Movable, _ctx: &mut ActuatorContext) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Index of an actuator within its set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActuatorId(usize);

struct Slot {
    actuator: Box<dyn Actuator>,
    occupants: HashSet<TargetId>,
}

/// All actuators of a level plus who is inside which volume
#[derive(Default)]
pub struct ActuatorSet {
    slots: Vec<Slot>,
}

impl ActuatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, actuator: impl Actuator) -> ActuatorId {
        log::debug!("Actuator '{}' registered", actuator.name());
        self.slots.push(Slot {
            actuator: Box::new(actuator),
            occupants: HashSet::new(),
        });
        ActuatorId(self.slots.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Typed access to a registered actuator
    pub fn get<T: Actuator>(&self, id: ActuatorId) -> Option<&T> {
        self.slots.get(id.0)?.actuator.as_any().downcast_ref()
    }

    pub fn get_mut<T: Actuator>(&mut self, id: ActuatorId) -> Option<&mut T> {
        self.slots.get_mut(id.0)?.actuator.as_any_mut().downcast_mut()
    }

    /// Whether `target` was inside the actuator's volume on the last update
    pub fn is_inside(&self, id: ActuatorId, target: TargetId) -> bool {
        self.slots
            .get(id.0)
            .is_some_and(|slot| slot.occupants.contains(&target))
    }

    /// Test one movable against every volume and dispatch callbacks
    pub fn update(&mut self, id: TargetId, target: &mut dyn Movable, ctx: &mut ActuatorContext) {
        for slot in &mut self.slots {
            let inside = slot.actuator.volume().contains(target.position());
            let was_inside = slot.occupants.contains(&id);

            match (was_inside, inside) {
                (false, true) => {
                    slot.occupants.insert(id);
                    slot.actuator.on_enter(id, target, ctx);
                    slot.actuator.on_stay(id, target, ctx);
                }
                (true, true) => slot.actuator.on_stay(id, target, ctx),
                (true, false) => {
                    slot.occupants.remove(&id);
                    slot.actuator.on_exit(id, target, ctx);
                }
                (false, false) => {}
            }
        }
    }

    /// Drop a movable that no longer exists without firing exit
    pub fn forget(&mut self, id: TargetId) {
        for slot in &mut self.slots {
            slot.occupants.remove(&id);
        }
    }
}
