// Physics system using rapier3d
//
// The character itself is not a rigid body. Locomotion only needs two
// queries from the world, a downward ray and a swept capsule move, which are
// expressed by the `CollisionWorld` trait so the controller can run against
// rapier or against a scripted test world.

pub mod body;
mod collision;
#[cfg(test)]
pub mod testing;
mod world;

use glam::Vec3;
use rapier3d::prelude::{Real, Vector};

pub use body::{ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionGroups, GroundMask};
pub use world::PhysicsWorld;

/// Identifier of a walkable surface registered with the collision world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

/// Result of a downward ground ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Surface that was hit, if it is a registered surface
    pub surface: Option<SurfaceId>,
    /// Distance from the ray origin to the hit point
    pub distance: f32,
}

/// Ground-collision primitive the character controller moves through
pub trait CollisionWorld {
    /// Cast straight down from `origin`; first hit in `mask` within `max_distance`.
    fn cast_down(&self, origin: Vec3, max_distance: f32, mask: GroundMask) -> Option<SurfaceHit>;

    /// Sweep the character capsule from `position` by `translation`.
    /// Returns the translation actually achieved.
    fn sweep(&self, position: Vec3, translation: Vec3, mask: GroundMask) -> Vec3;

    /// Current world position of a registered surface
    fn surface_position(&self, surface: SurfaceId) -> Option<Vec3>;
}

pub(crate) fn to_vector(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

pub(crate) fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
