// Launch pad: throws whatever lands on it upward

use std::any::Any;

use glam::Vec3;

use super::{Actuator, ActuatorContext, Volume};
use crate::game::movable::{ForceMode, Movable, TargetId};

#[derive(Debug, Clone)]
pub struct LaunchPad {
    name: String,
    volume: Volume,
    /// Upward launch speed
    pub jump_force: f32,
    /// Extra horizontal velocity added to the launch
    pub horizontal_boost: Vec3,
    /// Replace the velocity (true) or add to it (false)
    pub override_velocity: bool,
    /// Give the character its jumps back
    pub reset_jump_count: bool,
    /// Seconds before the pad fires again
    pub cooldown: f32,
    last_launch: Option<f64>,
}

impl LaunchPad {
    pub fn new(name: impl Into<String>, volume: Volume) -> Self {
        Self {
            name: name.into(),
            volume,
            jump_force: 20.0,
            horizontal_boost: Vec3::ZERO,
            override_velocity: true,
            reset_jump_count: true,
            cooldown: 0.5,
            last_launch: None,
        }
    }

    pub fn with_force(mut self, jump_force: f32, horizontal_boost: Vec3) -> Self {
        self.jump_force = jump_force;
        self.horizontal_boost = horizontal_boost;
        self
    }

    pub fn is_on_cooldown(&self, now: f64) -> bool {
        self.last_launch
            .is_some_and(|last| now < last + self.cooldown as f64)
    }

    /// Launch velocity for a given target. Props are thrown along the
    /// normalized up+boost direction instead.
    pub fn launch_velocity(&self, id: TargetId) -> Vec3 {
        match id {
            TargetId::Character => Vec3::Y * self.jump_force + self.horizontal_boost,
            TargetId::Prop(_) => {
                (Vec3::Y + self.horizontal_boost.normalize_or_zero()) * self.jump_force
            }
        }
    }
}

impl Actuator for LaunchPad {
    fn name(&self) -> &str {
        &self.name
    }

    fn volume(&self) -> &Volume {
        &self.volume
    }

    fn on_enter(&mut self, id: TargetId, target: &mut dyn Movable, ctx: &mut ActuatorContext) {
        let now = ctx.clock.time;
        if self.is_on_cooldown(now) {
            return;
        }

        let velocity = self.launch_velocity(id);
        target.apply_force(velocity, ForceMode::from_override_flag(self.override_velocity));
        if self.reset_jump_count {
            target.reset_state();
        }
        self.last_launch = Some(now);
        log::debug!("Launch pad '{}' launched {:?} at {}", self.name, id, velocity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
