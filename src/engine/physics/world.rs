use glam::{Quat, Vec3};
use rapier3d::control::{CharacterLength, KinematicCharacterController};
use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude::*;
use std::collections::HashMap;

use super::body::{self, presets};
use super::{from_vector, to_vector, CollisionWorld, GroundMask, SurfaceHit, SurfaceId};

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector for dynamic props (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts and character sweeps
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Slide-and-step mover used for character sweeps
    character_controller: KinematicCharacterController,

    /// Capsule swept by `sweep`
    character_shape: SharedShape,

    /// Walkable colliders and the surface they belong to
    collider_to_surface: HashMap<ColliderHandle, SurfaceId>,

    /// Body carrying each surface
    surface_to_body: HashMap<SurfaceId, RigidBodyHandle>,

    next_surface: u32,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81, 0.0])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        let mut character_controller = KinematicCharacterController::default();
        // The controller does its own grounding; the mover only slides
        character_controller.snap_to_ground = None;
        character_controller.offset = CharacterLength::Absolute(0.01);

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            character_controller,
            character_shape: body::character_shape(2.0, 0.5),
            collider_to_surface: HashMap::new(),
            surface_to_body: HashMap::new(),
            next_surface: 0,
        }
    }

    /// Step the physics simulation forward by `dt` seconds
    pub fn step(&mut self, dt: Real) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Set the capsule used for character sweeps
    pub fn set_character_shape(&mut self, height: Real, radius: Real) {
        self.character_shape = body::character_shape(height, radius);
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Register a body/collider pair as a walkable surface
    pub fn add_surface(&mut self, body: RigidBody, collider: Collider) -> SurfaceId {
        let body_handle = self.add_rigid_body(body);
        self.attach_surface(body_handle, collider)
    }

    /// Attach a walkable collider to an existing body
    pub fn attach_surface(&mut self, body_handle: RigidBodyHandle, collider: Collider) -> SurfaceId {
        let collider_handle = self.add_collider(collider, body_handle);

        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;
        self.collider_to_surface.insert(collider_handle, id);
        self.surface_to_body.insert(id, body_handle);
        id
    }

    /// Static ground block centred at `center`
    pub fn add_ground(&mut self, center: Vec3, half_extents: Vec3) -> SurfaceId {
        self.add_surface(
            presets::ground_body(center),
            presets::ground_collider(half_extents),
        )
    }

    /// Kinematic platform centred at `center`
    pub fn add_platform(&mut self, center: Vec3, half_extents: Vec3) -> SurfaceId {
        self.add_surface(
            presets::platform_body(center),
            presets::platform_collider(half_extents),
        )
    }

    /// Dynamic ball prop
    pub fn add_prop(&mut self, center: Vec3, radius: Real) -> RigidBodyHandle {
        let handle = self.add_rigid_body(presets::prop_body(center));
        self.add_collider(presets::prop_collider(radius), handle);
        handle
    }

    /// Body carrying a registered surface
    pub fn surface_body(&self, surface: SurfaceId) -> Option<RigidBodyHandle> {
        self.surface_to_body.get(&surface).copied()
    }

    /// Move a kinematic body to `position` during the next step
    pub fn set_kinematic_target(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_translation(to_vector(position));
        }
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.get_rigid_body(handle)
            .map(|body| from_vector(body.translation()))
    }

    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.get_rigid_body(handle).map(|body| from_vector(body.linvel()))
    }

    pub fn set_body_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec3) {
        if let Some(body) = self.get_rigid_body_mut(handle) {
            body.set_linvel(to_vector(velocity), true);
        }
    }

    /// Place a body at `position`, optionally changing its orientation
    pub fn teleport_body(&mut self, handle: RigidBodyHandle, position: Vec3, rotation: Option<Quat>) {
        if let Some(body) = self.get_rigid_body_mut(handle) {
            body.set_translation(to_vector(position), true);
            if let Some(rotation) = rotation {
                let q = UnitQuaternion::from_quaternion(Quaternion::new(
                    rotation.w, rotation.x, rotation.y, rotation.z,
                ));
                body.set_rotation(q, true);
            }
        }
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        ray_origin: Vec3,
        ray_dir: Vec3,
        max_toi: Real,
        solid: bool,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(point![ray_origin.x, ray_origin.y, ray_origin.z], to_vector(ray_dir));
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            solid,
            filter,
        )
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionWorld for PhysicsWorld {
    fn cast_down(&self, origin: Vec3, max_distance: f32, mask: GroundMask) -> Option<SurfaceHit> {
        if mask.is_empty() {
            return None;
        }

        let filter = QueryFilter::default()
            .exclude_sensors()
            .groups(mask.query_groups());

        self.raycast(origin, Vec3::NEG_Y, max_distance, true, filter)
            .map(|(collider, distance)| SurfaceHit {
                surface: self.collider_to_surface.get(&collider).copied(),
                distance,
            })
    }

    fn sweep(&self, position: Vec3, translation: Vec3, mask: GroundMask) -> Vec3 {
        if translation == Vec3::ZERO {
            return Vec3::ZERO;
        }

        let character_pos = Isometry::translation(position.x, position.y, position.z);
        let filter = QueryFilter::default()
            .exclude_sensors()
            .groups(mask.query_groups());

        let movement = self.character_controller.move_shape(
            self.integration_parameters.dt,
            &self.rigid_body_set,
            &self.collider_set,
            &self.query_pipeline,
            &*self.character_shape,
            &character_pos,
            to_vector(translation),
            filter,
            |_| {},
        );

        from_vector(&movement.translation)
    }

    fn surface_position(&self, surface: SurfaceId) -> Option<Vec3> {
        self.surface_body(surface)
            .and_then(|handle| self.body_position(handle))
    }
}
