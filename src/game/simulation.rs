// Simulation tick pipeline
//
// One call to `tick` runs every system once, in a fixed order:
// deferred actions, physics, actuators (before or after locomotion),
// locomotion, camera. Nothing else drives the game state.

use crate::engine::game_loop::SimClock;
use crate::engine::input::ControllerInput;
use crate::engine::physics::{CollisionWorld, PhysicsWorld, RigidBodyHandle};
use crate::game::actuators::{Actuator, ActuatorContext, ActuatorId, ActuatorSet};
use crate::game::camera::CameraRig;
use crate::game::character::CharacterController;
use crate::game::movable::{Movable, PropBody, TargetId};
use crate::game::platform::MovingPlatform;
use crate::game::scheduler::{DeferredAction, DeferredQueue};

/// When actuator forces land relative to the character's own integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActuatorOrdering {
    /// Forces are applied, then gravity integrates on top of them
    #[default]
    BeforeLocomotion,
    /// The character integrates first; forces are seen unmodified at tick end
    AfterLocomotion,
}

/// The whole playable world
pub struct Simulation {
    physics: PhysicsWorld,
    character: CharacterController,
    camera: Option<CameraRig>,
    actuators: ActuatorSet,
    platforms: Vec<MovingPlatform>,
    props: Vec<RigidBodyHandle>,
    deferred: DeferredQueue<DeferredAction>,
    ordering: ActuatorOrdering,
}

impl Simulation {
    pub fn new(
        mut physics: PhysicsWorld,
        character: CharacterController,
        camera: Option<CameraRig>,
    ) -> Self {
        let config = character.config();
        physics.set_character_shape(config.height, config.radius);

        Self {
            physics,
            character,
            camera,
            actuators: ActuatorSet::new(),
            platforms: Vec::new(),
            props: Vec::new(),
            deferred: DeferredQueue::new(),
            ordering: ActuatorOrdering::default(),
        }
    }

    pub fn with_ordering(mut self, ordering: ActuatorOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn ordering(&self) -> ActuatorOrdering {
        self.ordering
    }

    pub fn character(&self) -> &CharacterController {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut CharacterController {
        &mut self.character
    }

    pub fn camera(&self) -> Option<&CameraRig> {
        self.camera.as_ref()
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    pub fn actuators(&self) -> &ActuatorSet {
        &self.actuators
    }

    pub fn actuators_mut(&mut self) -> &mut ActuatorSet {
        &mut self.actuators
    }

    pub fn props(&self) -> &[RigidBodyHandle] {
        &self.props
    }

    pub fn pending_actions(&self) -> usize {
        self.deferred.len()
    }

    pub fn add_actuator(&mut self, actuator: impl Actuator) -> ActuatorId {
        self.actuators.add(actuator)
    }

    pub fn add_platform(&mut self, platform: MovingPlatform) {
        self.platforms.push(platform);
    }

    /// Register a dynamic body so actuators can act on it
    pub fn add_prop(&mut self, handle: RigidBodyHandle) {
        self.props.push(handle);
    }

    /// Forward a sensitivity change from the settings
    pub fn set_camera_sensitivity(&mut self, sensitivity: f32) {
        if let Some(camera) = &mut self.camera {
            camera.set_sensitivity(sensitivity);
        }
    }

    /// Run one simulation step. A paused clock ignores input and moves nothing.
    pub fn tick(&mut self, clock: &SimClock, input: &ControllerInput) {
        let input = if clock.is_paused() {
            ControllerInput::default()
        } else {
            *input
        };

        self.run_deferred(clock);
        self.physics_phase(clock);
        if self.ordering == ActuatorOrdering::BeforeLocomotion {
            self.actuator_phase(clock);
        }
        self.locomotion_phase(clock, &input);
        if self.ordering == ActuatorOrdering::AfterLocomotion {
            self.actuator_phase(clock);
        }
        self.camera_phase(clock, &input);
    }

    fn run_deferred(&mut self, clock: &SimClock) {
        for action in self.deferred.drain_due(clock.time) {
            match action {
                DeferredAction::Respawn { target, request } => {
                    self.with_movable(target, |movable| request.apply(movable));
                    log::info!("{:?} respawned at {}", target, request.position);
                }
            }
        }
    }

    fn physics_phase(&mut self, clock: &SimClock) {
        if clock.is_paused() {
            return;
        }
        for platform in &mut self.platforms {
            platform.advance(&mut self.physics, clock.dt);
        }
        self.physics.step(clock.dt);
    }

    fn actuator_phase(&mut self, clock: &SimClock) {
        if clock.is_paused() {
            return;
        }
        let mut ctx = ActuatorContext {
            clock: *clock,
            deferred: &mut self.deferred,
        };

        self.actuators
            .update(TargetId::Character, &mut self.character, &mut ctx);
        for &handle in &self.props {
            let mut prop = PropBody::new(&mut self.physics, handle);
            self.actuators
                .update(TargetId::Prop(handle), &mut prop, &mut ctx);
        }
    }

    fn locomotion_phase(&mut self, clock: &SimClock, input: &ControllerInput) {
        let camera = self.camera.as_ref().map(CameraRig::basis);
        let world: &dyn CollisionWorld = &self.physics;
        self.character.tick(clock, input, camera, Some(world));
    }

    fn camera_phase(&mut self, clock: &SimClock, input: &ControllerInput) {
        if let Some(camera) = &mut self.camera {
            camera.apply_pointer(input.look_delta);
            camera.follow(self.character.position(), clock.dt);
        }
    }

    fn with_movable(&mut self, id: TargetId, f: impl FnOnce(&mut dyn Movable)) {
        match id {
            TargetId::Character => f(&mut self.character),
            TargetId::Prop(handle) => f(&mut PropBody::new(&mut self.physics, handle)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game_loop::FIXED_TIMESTEP;
    use crate::game::actuators::{LaunchPad, RespawnZone, Volume, Vortex};
    use crate::game::camera::CameraConfig;
    use crate::game::character::ControllerConfig;
    use crate::game::movable::ForceMode;
    use approx::assert_abs_diff_eq;
    use glam::{Vec2, Vec3};

    /// Ground slab with its top face at y = 0
    fn course() -> PhysicsWorld {
        let mut physics = PhysicsWorld::new();
        physics.add_ground(Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 0.5, 20.0));
        physics
    }

    fn simulation(physics: PhysicsWorld, start: Vec3) -> Simulation {
        let character = CharacterController::new(ControllerConfig::default(), start);
        let camera = CameraRig::new(CameraConfig::default(), start);
        Simulation::new(physics, character, Some(camera))
    }

    fn run(sim: &mut Simulation, clock: &mut SimClock, ticks: usize, input: ControllerInput) {
        for _ in 0..ticks {
            sim.tick(clock, &input);
            *clock = clock.next();
        }
    }

    fn start_clock() -> SimClock {
        SimClock::new(FIXED_TIMESTEP, 0.0)
    }

    #[test]
    fn test_character_settles_on_ground() {
        let mut sim = simulation(course(), Vec3::new(0.0, 1.5, 0.0));
        let mut clock = start_clock();
        run(&mut sim, &mut clock, 90, ControllerInput::default());

        let character = sim.character();
        assert!(character.is_grounded());
        assert!(character.position().y > 0.95 && character.position().y < 1.15);
        assert_eq!(character.jump_count(), 0);
    }

    #[test]
    fn test_walks_camera_forward() {
        let mut sim = simulation(course(), Vec3::new(0.0, 1.05, 0.0));
        let mut clock = start_clock();
        run(&mut sim, &mut clock, 10, ControllerInput::default());

        let forward = ControllerInput {
            move_axis: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        let before = sim.character().position();
        run(&mut sim, &mut clock, 60, forward);
        let moved = sim.character().position() - before;

        assert_abs_diff_eq!(moved.z, -5.0, epsilon = 0.1);
        assert_abs_diff_eq!(moved.x, 0.0, epsilon = 0.05);
    }

    #[test]
    fn test_paused_tick_changes_nothing() {
        let mut sim = simulation(course(), Vec3::new(0.0, 5.0, 0.0));
        let mut clock = start_clock();
        run(&mut sim, &mut clock, 5, ControllerInput::default());

        let position = sim.character().position();
        let velocity = sim.character().get_velocity();
        let jump = ControllerInput {
            jump_pressed: true,
            look_delta: Vec2::new(10.0, 0.0),
            ..Default::default()
        };
        sim.tick(&SimClock::paused(clock.time), &jump);

        assert_eq!(sim.character().position(), position);
        assert_eq!(sim.character().get_velocity(), velocity);
        assert_eq!(sim.camera().unwrap().yaw(), 0.0);
    }

    #[test]
    fn test_paused_tick_skips_actuators() {
        let start = Vec3::new(0.0, 1.05, 0.0);
        let mut sim = simulation(course(), start);
        let pad = sim.add_actuator(LaunchPad::new(
            "pad",
            Volume::cuboid(Vec3::new(0.0, 0.5, 0.0), Vec3::splat(1.0)),
        ));

        sim.tick(&SimClock::paused(0.0), &ControllerInput::default());
        assert_eq!(sim.character().get_velocity(), Vec3::ZERO);
        assert!(!sim.actuators().is_inside(pad, TargetId::Character));

        sim.tick(&start_clock(), &ControllerInput::default());
        assert!(sim.character().get_velocity().y > 19.0);
    }

    #[test]
    fn test_launch_pad_ordering() {
        let start = Vec3::new(0.0, 1.05, 0.0);
        let pad = || LaunchPad::new("pad", Volume::cuboid(Vec3::new(0.0, 0.5, 0.0), Vec3::splat(1.0)));

        let mut before = simulation(course(), start);
        before.add_actuator(pad());
        before.tick(&start_clock(), &ControllerInput::default());
        let expected = 20.0 - 9.81 * FIXED_TIMESTEP;
        assert_abs_diff_eq!(before.character().get_velocity().y, expected, epsilon = 1e-4);

        let mut after =
            simulation(course(), start).with_ordering(ActuatorOrdering::AfterLocomotion);
        after.add_actuator(pad());
        after.tick(&start_clock(), &ControllerInput::default());
        assert_eq!(after.character().get_velocity(), Vec3::new(0.0, 20.0, 0.0));
    }

    #[test]
    fn test_fall_into_kill_plane_respawns_with_zero_velocity() {
        let spawn = Vec3::new(0.0, 3.0, 0.0);
        let mut sim = simulation(course(), Vec3::new(30.0, 0.0, 0.0))
            .with_ordering(ActuatorOrdering::AfterLocomotion);
        sim.add_actuator(RespawnZone::new(
            "kill plane",
            Volume::cuboid(Vec3::new(0.0, -30.0, 0.0), Vec3::new(200.0, 5.0, 200.0)),
            Some(spawn),
        ));
        sim.character_mut()
            .apply_external_force(Vec3::new(4.0, 0.0, 0.0), ForceMode::Additive);

        let mut clock = start_clock();
        let mut respawned = false;
        for _ in 0..300 {
            sim.tick(&clock, &ControllerInput::default());
            clock = clock.next();
            if sim.character().position() == spawn {
                respawned = true;
                break;
            }
        }

        assert!(respawned);
        assert_eq!(sim.character().get_velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_delayed_respawn_runs_from_queue() {
        let spawn = Vec3::new(10.0, 3.0, 0.0);
        let mut sim = simulation(course(), Vec3::new(0.0, 1.05, 0.0));
        let mut zone = RespawnZone::new(
            "checkpoint",
            Volume::cuboid(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(2.0)),
            Some(spawn),
        );
        zone.respawn_delay = 0.5;
        let zone = sim.add_actuator(zone);

        let mut clock = start_clock();
        run(&mut sim, &mut clock, 1, ControllerInput::default());
        assert_eq!(sim.pending_actions(), 1);
        assert!(sim
            .actuators()
            .get::<RespawnZone>(zone)
            .unwrap()
            .is_busy(clock.time));

        run(&mut sim, &mut clock, 40, ControllerInput::default());
        assert_eq!(sim.pending_actions(), 0);
        assert_abs_diff_eq!(sim.character().position().x, 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_platform_carries_character() {
        let mut physics = PhysicsWorld::new();
        let platform = MovingPlatform::new(
            &mut physics,
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(3.0, 0.5, 3.0),
            1.0,
        )
        .with_waypoint(Vec3::new(10.0, -0.5, 0.0));

        let mut sim = simulation(physics, Vec3::new(0.0, 1.05, 0.0));
        sim.add_platform(platform);

        let mut clock = start_clock();
        run(&mut sim, &mut clock, 10, ControllerInput::default());
        let start_x = sim.character().position().x;
        run(&mut sim, &mut clock, 60, ControllerInput::default());

        assert!(sim.character().is_grounded());
        assert_abs_diff_eq!(sim.character().position().x - start_x, 1.0, epsilon = 0.05);
    }

    #[test]
    fn test_vortex_pulls_props() {
        let mut physics = PhysicsWorld::new();
        let prop = physics.add_prop(Vec3::new(5.0, 2.0, 0.0), 0.5);

        let mut sim = simulation(physics, Vec3::new(100.0, 0.0, 100.0));
        sim.add_prop(prop);
        sim.add_actuator(Vortex::new("twister", Vec3::ZERO, 20.0));

        sim.tick(&start_clock(), &ControllerInput::default());
        let velocity = sim.physics().body_velocity(prop).unwrap();
        // Pulled toward the centre and spun counter-clockwise seen from above
        assert!(velocity.x < 0.0);
        assert!(velocity.z > 0.0);
    }

    #[test]
    fn test_sensitivity_update_reaches_camera() {
        let mut sim = simulation(course(), Vec3::new(0.0, 1.05, 0.0));
        sim.set_camera_sensitivity(1.0);

        let look = ControllerInput {
            look_delta: Vec2::new(5.0, 0.0),
            ..Default::default()
        };
        sim.tick(&start_clock(), &look);
        assert_eq!(sim.camera().unwrap().yaw(), 5.0);
    }
}
