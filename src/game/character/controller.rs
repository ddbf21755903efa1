// Character controller
//
// Runs one locomotion tick in a fixed order: ground check, steering, jump,
// glide, gravity, platform riding, stamina. External systems only touch the
// character through `apply_external_force`, `reset_jump_count` and `teleport`.

use glam::{Quat, Vec3};

use crate::core::math::{flatten, launch_speed, look_rotation};
use crate::engine::game_loop::SimClock;
use crate::engine::input::ControllerInput;
use crate::engine::physics::CollisionWorld;
use crate::game::camera::CameraBasis;
use crate::game::error::{Misconfiguration, WarningLog};
use crate::game::movable::{ForceMode, Movable};

use super::config::ControllerConfig;
use super::probe::{probe, GroundProbeResult};
use super::rider::PlatformRider;
use super::stamina::StaminaPool;
use super::state::{CharacterState, LocomotionState, StateTracker};

/// Third-person platformer controller for one character
#[derive(Debug)]
pub struct CharacterController {
    config: ControllerConfig,
    state: CharacterState,
    stamina: StaminaPool,
    rider: PlatformRider,
    tracker: StateTracker,
    warnings: WarningLog,
}

impl CharacterController {
    pub fn new(config: ControllerConfig, position: Vec3) -> Self {
        let mut warnings = WarningLog::new();
        if config.ground_mask.is_empty() {
            warnings.warn(Misconfiguration::EmptyGroundMask);
        }
        if config.stamina.enabled && config.stamina.max <= 0.0 {
            warnings.warn(Misconfiguration::NoStaminaCapacity);
        }

        Self {
            stamina: StaminaPool::new(config.stamina),
            config,
            state: CharacterState::at(position),
            rider: PlatformRider::new(),
            tracker: StateTracker::new(),
            warnings,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn rotation(&self) -> Quat {
        self.state.rotation
    }

    pub fn get_velocity(&self) -> Vec3 {
        self.state.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    pub fn is_gliding(&self) -> bool {
        self.state.is_gliding
    }

    pub fn jump_count(&self) -> u32 {
        self.state.jump_count
    }

    pub fn stamina(&self) -> f32 {
        self.stamina.current()
    }

    pub fn max_stamina(&self) -> f32 {
        self.stamina.max()
    }

    pub fn stamina_percent(&self) -> f32 {
        self.stamina.percent()
    }

    pub fn locomotion(&self) -> LocomotionState {
        self.tracker.state()
    }

    /// Seconds spent in the current locomotion state
    pub fn time_in_state(&self) -> f32 {
        self.tracker.state_time()
    }

    /// Merge an external force into the velocity
    pub fn apply_external_force(&mut self, force: Vec3, mode: ForceMode) {
        self.state.velocity = mode.compose(self.state.velocity, force);
    }

    /// Re-enable the full set of jumps
    pub fn reset_jump_count(&mut self) {
        self.state.jump_count = 0;
    }

    /// Place the character without sweeping; forgets the ridden surface
    pub fn teleport(&mut self, position: Vec3, rotation: Option<Quat>) {
        self.state.position = position;
        if let Some(rotation) = rotation {
            self.state.rotation = rotation;
        }
        self.rider.clear();
    }

    /// Advance the character by one simulation step.
    ///
    /// Without a camera the character steers relative to its own heading.
    /// Without a collision world it is always airborne and moves unobstructed.
    pub fn tick(
        &mut self,
        clock: &SimClock,
        input: &ControllerInput,
        camera: Option<CameraBasis>,
        world: Option<&dyn CollisionWorld>,
    ) {
        if clock.is_paused() {
            return;
        }
        let dt = clock.dt;

        if world.is_none() {
            self.warnings.warn(Misconfiguration::MissingCollisionWorld);
        }
        let basis = camera.unwrap_or_else(|| {
            self.warnings.warn(Misconfiguration::MissingCamera);
            CameraBasis {
                forward: self.state.forward(),
                right: self.state.right(),
            }
        });

        self.ground_check(world);
        self.steer(input, basis, world, dt);
        self.jump(input);
        self.glide(input, basis, world, dt);
        self.apply_gravity(world, dt);
        self.ride_platform(world);

        self.stamina.tick(dt, self.state.grounded, self.state.is_gliding);
        self.tracker.update(self.state.locomotion(), dt);
    }

    fn probe(&self, world: Option<&dyn CollisionWorld>) -> GroundProbeResult {
        probe(
            world,
            self.state.position,
            self.config.probe_length(),
            self.config.ground_mask,
        )
    }

    fn ground_check(&mut self, world: Option<&dyn CollisionWorld>) {
        self.state.grounded = self.probe(world).grounded;

        if self.state.grounded && self.state.velocity.y < 0.0 {
            self.state.velocity.y = self.config.grounded_velocity;
            self.state.jump_count = 0;
        }
    }

    fn steer(
        &mut self,
        input: &ControllerInput,
        basis: CameraBasis,
        world: Option<&dyn CollisionWorld>,
        dt: f32,
    ) {
        let axis = input.move_axis;
        let direction = (flatten(basis.forward) * axis.y + flatten(basis.right) * axis.x)
            .normalize_or_zero();
        if direction.length() < self.config.move_deadzone {
            return;
        }

        self.face(direction, dt);

        let mut speed = self.config.move_speed;
        if input.sprint && self.state.grounded {
            speed *= self.config.sprint_multiplier;
        }
        self.move_by(world, direction * speed * dt);
    }

    fn jump(&mut self, input: &ControllerInput) {
        if !input.jump_pressed || self.state.jump_count >= self.config.max_jumps {
            return;
        }

        let jump_number = self.state.jump_count + 1;
        if !self.stamina.can_jump(jump_number) {
            log::debug!("Jump {} rejected, stamina {:.1}", jump_number, self.stamina.current());
            return;
        }

        self.state.velocity.y = launch_speed(self.config.jump_height, self.config.gravity);
        self.state.jump_count = jump_number;
        self.stamina.spend_jump(jump_number);
    }

    fn glide(
        &mut self,
        input: &ControllerInput,
        basis: CameraBasis,
        world: Option<&dyn CollisionWorld>,
        dt: f32,
    ) {
        self.state.is_gliding = input.glide
            && !self.state.grounded
            && self.config.can_glide
            && self.stamina.can_glide();

        if !self.state.is_gliding {
            return;
        }

        let direction = flatten(basis.forward);
        if direction == Vec3::ZERO {
            return;
        }
        self.move_by(world, direction * self.config.glide_speed * dt);
        self.face(direction, dt);
    }

    fn apply_gravity(&mut self, world: Option<&dyn CollisionWorld>, dt: f32) {
        let velocity = &mut self.state.velocity;
        if velocity.y < 0.0 && !self.state.is_gliding {
            velocity.y += self.config.gravity * self.config.fall_multiplier * dt;
        } else if self.state.is_gliding {
            velocity.y += self.config.glide_gravity * dt;
        } else {
            velocity.y += self.config.gravity * dt;
        }

        self.move_by(world, self.state.velocity * dt);
    }

    /// Carry the character along with the surface it stands on
    fn ride_platform(&mut self, world: Option<&dyn CollisionWorld>) {
        let Some(world) = world else {
            self.rider.clear();
            return;
        };

        let support = self.probe(Some(world));
        let surface = support.surface.filter(|_| support.grounded);
        self.state.position += self.rider.update(surface, world);
    }

    fn face(&mut self, direction: Vec3, dt: f32) {
        if let Some(target) = look_rotation(direction, Vec3::Y) {
            let t = (self.config.rotation_speed * dt).min(1.0);
            self.state.rotation = self.state.rotation.slerp(target, t);
        }
    }

    fn move_by(&mut self, world: Option<&dyn CollisionWorld>, translation: Vec3) {
        let achieved = match world {
            Some(world) => world.sweep(self.state.position, translation, self.config.ground_mask),
            None => translation,
        };
        self.state.position += achieved;
    }
}

impl Movable for CharacterController {
    fn position(&self) -> Vec3 {
        self.state.position
    }

    fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    fn apply_force(&mut self, force: Vec3, mode: ForceMode) {
        self.apply_external_force(force, mode);
    }

    fn reset_state(&mut self) {
        self.reset_jump_count();
    }

    fn teleport(&mut self, position: Vec3, rotation: Option<Quat>) {
        CharacterController::teleport(self, position, rotation);
    }
}
