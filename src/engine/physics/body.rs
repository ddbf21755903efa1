use super::collision::CollisionGroups;
use glam::Vec3;
use rapier3d::prelude::*;

pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    gravity_scale: Real,
    can_sleep: bool,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            gravity_scale: 1.0,
            can_sleep: true,
        }
    }

    /// Create a new kinematic position-based body (moved by script, rideable)
    pub fn new_kinematic_position_based() -> Self {
        Self {
            body_type: RigidBodyType::KinematicPositionBased,
            position: Isometry::identity(),
            gravity_scale: 0.0,
            can_sleep: false,
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            gravity_scale: 0.0,
            can_sleep: false,
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = Isometry::translation(position.x, position.y, position.z);
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        let mut body = RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .build();

        if self.body_type == RigidBodyType::Dynamic {
            // Some air resistance so pushed props settle
            body.set_linear_damping(0.5);
            body.set_angular_damping(1.0);
        }

        body
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder3D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    friction: Real,
    restitution: Real,
    density: Real,
}

impl ColliderBuilder3D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Ground,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// Create a box-shaped collider from half extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::with_shape(SharedShape::cuboid(
            half_extents.x,
            half_extents.y,
            half_extents.z,
        ))
    }

    /// Create a sphere-shaped collider
    pub fn ball(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        rapier3d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .build()
    }
}

/// Capsule used for character sweeps, centred on the character origin
pub fn character_shape(height: Real, radius: Real) -> SharedShape {
    let half_height = (height / 2.0 - radius).max(0.0); // cylinder part only
    SharedShape::capsule_y(half_height, radius)
}

/// Common rigid body configurations for level objects
pub mod presets {
    use super::*;

    /// Static ground block
    pub fn ground_body(center: Vec3) -> RigidBody {
        BodyBuilder::new_fixed().position(center).build()
    }

    pub fn ground_collider(half_extents: Vec3) -> Collider {
        ColliderBuilder3D::cuboid(half_extents)
            .collision_groups(CollisionGroups::Ground)
            .friction(0.5)
            .build()
    }

    /// Script-driven moving platform
    pub fn platform_body(center: Vec3) -> RigidBody {
        BodyBuilder::new_kinematic_position_based()
            .position(center)
            .build()
    }

    pub fn platform_collider(half_extents: Vec3) -> Collider {
        ColliderBuilder3D::cuboid(half_extents)
            .collision_groups(CollisionGroups::Platform)
            .friction(0.8)
            .build()
    }

    /// Loose physics prop (crate or ball) that actuators can push
    pub fn prop_body(center: Vec3) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(center)
            .can_sleep(false) // props must react to actuators at any time
            .build()
    }

    pub fn prop_collider(radius: Real) -> Collider {
        ColliderBuilder3D::ball(radius)
            .collision_groups(CollisionGroups::Prop)
            .restitution(0.3)
            .build()
    }
}
