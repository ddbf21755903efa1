// Push zone: a wind volume that keeps pushing while a movable is inside

use std::any::Any;
use std::collections::HashMap;

use glam::Vec3;

use super::{Actuator, ActuatorContext, Volume};
use crate::core::math::lerp;
use crate::game::movable::{ForceMode, Movable, TargetId};

/// What happens to a movable's velocity when it leaves the zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitBehavior {
    /// Leave velocity untouched
    KeepVelocity,
    /// Scale velocity down by `velocity_clear_amount`
    #[default]
    DampenVelocity,
    /// Remove the component along the push direction
    ClearPushDirection,
    /// Stop dead
    ClearAllVelocity,
}

#[derive(Debug, Clone, Copy, Default)]
struct Occupant {
    time_in_zone: f32,
    multiplier: f32,
    last_push: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct PushZone {
    name: String,
    volume: Volume,
    push_force: Vec3,
    pub override_velocity: bool,
    /// Apply `push_force * dt` every tick; otherwise the full force every `force_interval`
    pub continuous: bool,
    pub force_interval: f32,
    /// Ramp the force from 1x to `max_force_multiplier` over `acceleration_time`
    pub accelerate_over_time: bool,
    pub max_force_multiplier: f32,
    pub acceleration_time: f32,
    pub reset_jump_on_enter: bool,
    pub exit_behavior: ExitBehavior,
    /// Fraction of velocity removed by `DampenVelocity`, in [0, 1]
    pub velocity_clear_amount: f32,
    /// Dampen only along the push direction
    pub only_clear_push_direction: bool,
    occupants: HashMap<TargetId, Occupant>,
}

impl PushZone {
    pub fn new(name: impl Into<String>, volume: Volume, push_force: Vec3) -> Self {
        Self {
            name: name.into(),
            volume,
            push_force,
            override_velocity: false,
            continuous: true,
            force_interval: 0.1,
            accelerate_over_time: false,
            max_force_multiplier: 3.0,
            acceleration_time: 2.0,
            reset_jump_on_enter: true,
            exit_behavior: ExitBehavior::default(),
            velocity_clear_amount: 0.7,
            only_clear_push_direction: true,
            occupants: HashMap::new(),
        }
    }

    pub fn push_force(&self) -> Vec3 {
        self.push_force
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// Seconds `id` has spent inside, 0 when outside
    pub fn time_in_zone(&self, id: TargetId) -> f32 {
        self.occupants.get(&id).map_or(0.0, |o| o.time_in_zone)
    }

    /// Force currently applied to `id`, before any per-tick scaling
    pub fn current_force(&self, id: TargetId) -> Vec3 {
        self.occupants
            .get(&id)
            .map_or(Vec3::ZERO, |o| self.push_force * o.multiplier)
    }

    fn multiplier(&self, time_in_zone: f32) -> f32 {
        if !self.accelerate_over_time {
            return 1.0;
        }
        let t = if self.acceleration_time > 0.0 {
            (time_in_zone / self.acceleration_time).clamp(0.0, 1.0)
        } else {
            1.0
        };
        lerp(1.0, self.max_force_multiplier, t)
    }

    /// Velocity after leaving the zone with `velocity`
    pub fn exit_velocity(&self, velocity: Vec3) -> Option<Vec3> {
        let direction = self.push_force.normalize_or_zero();
        let along = direction * velocity.dot(direction);

        match self.exit_behavior {
            ExitBehavior::KeepVelocity => None,
            ExitBehavior::ClearAllVelocity => Some(Vec3::ZERO),
            ExitBehavior::ClearPushDirection => Some(velocity - along),
            ExitBehavior::DampenVelocity if self.only_clear_push_direction => {
                Some(velocity - along + along * (1.0 - self.velocity_clear_amount))
            }
            ExitBehavior::DampenVelocity => Some(velocity * (1.0 - self.velocity_clear_amount)),
        }
    }
}

impl Actuator for PushZone {
    fn name(&self) -> &str {
        &self.name
    }

    fn volume(&self) -> &Volume {
        &self.volume
    }

    fn on_enter(&mut self, id: TargetId, target: &mut dyn Movable, _ctx: &mut ActuatorContext) {
        self.occupants.insert(
            id,
            Occupant {
                multiplier: 1.0,
                ..Default::default()
            },
        );
        if self.reset_jump_on_enter {
            target.reset_state();
        }
        log::debug!("{:?} entered push zone '{}'", id, self.name);
    }

    fn on_stay(&mut self, id: TargetId, target: &mut dyn Movable, ctx: &mut ActuatorContext) {
        let dt = ctx.clock.dt;
        let now = ctx.clock.time;

        let Some(mut occupant) = self.occupants.get(&id).copied() else {
            return;
        };
        occupant.time_in_zone += dt;
        occupant.multiplier = self.multiplier(occupant.time_in_zone);

        let mode = ForceMode::from_override_flag(self.override_velocity);
        let force = self.push_force * occupant.multiplier;
        if self.continuous {
            target.apply_force(force * dt, mode);
        } else if occupant
            .last_push
            .map_or(true, |last| now >= last + self.force_interval as f64)
        {
            target.apply_force(force, mode);
            occupant.last_push = Some(now);
        }

        self.occupants.insert(id, occupant);
    }

    fn on_exit(&mut self, id: TargetId, target: &mut dyn Movable, _ctx: &mut ActuatorContext) {
        self.occupants.remove(&id);
        if let Some(velocity) = self.exit_velocity(target.velocity()) {
            target.apply_force(velocity, ForceMode::Override);
        }
        log::debug!("{:?} left push zone '{}'", id, self.name);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game_loop::SimClock;
    use crate::game::actuators::testing::Dummy;
    use crate::game::scheduler::DeferredQueue;
    use approx::assert_abs_diff_eq;

    const ID: TargetId = TargetId::Character;

    fn zone() -> PushZone {
        PushZone::new("wind", Volume::cuboid(Vec3::ZERO, Vec3::splat(5.0)), Vec3::new(0.0, 10.0, 0.0))
    }

    fn with_ctx(clock: SimClock, f: impl FnOnce(&mut ActuatorContext)) {
        let mut deferred = DeferredQueue::new();
        let mut ctx = ActuatorContext {
            clock,
            deferred: &mut deferred,
        };
        f(&mut ctx);
    }

    fn enter(zone: &mut PushZone, target: &mut Dummy, clock: SimClock) {
        with_ctx(clock, |ctx| zone.on_enter(ID, target, ctx));
    }

    fn stay(zone: &mut PushZone, target: &mut Dummy, clock: SimClock) {
        with_ctx(clock, |ctx| zone.on_stay(ID, target, ctx));
    }

    fn exit(zone: &mut PushZone, target: &mut Dummy, clock: SimClock) {
        with_ctx(clock, |ctx| zone.on_exit(ID, target, ctx));
    }

    #[test]
    fn test_enter_resets_jumps() {
        let mut zone = zone();
        let mut target = Dummy::at(Vec3::ZERO);
        enter(&mut zone, &mut target, SimClock::new(0.1, 0.0));

        assert_eq!(target.resets, 1);
        assert!(zone.is_occupied());
        assert_eq!(zone.current_force(ID), Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_continuous_push_scaled_by_dt() {
        let mut zone = zone();
        let mut target = Dummy::at(Vec3::ZERO);
        let clock = SimClock::new(0.1, 0.0);

        enter(&mut zone, &mut target, clock);
        stay(&mut zone, &mut target, clock);
        stay(&mut zone, &mut target, clock.next());

        assert_abs_diff_eq!(target.velocity.y, 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(zone.time_in_zone(ID), 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_interval_push() {
        let mut zone = zone();
        zone.continuous = false;
        zone.force_interval = 0.25;
        let mut target = Dummy::at(Vec3::ZERO);

        let mut clock = SimClock::new(0.1, 0.0);
        enter(&mut zone, &mut target, clock);
        // Pushes at t = 0.0 and t = 0.3
        for _ in 0..4 {
            stay(&mut zone, &mut target, clock);
            clock = clock.next();
        }
        assert_abs_diff_eq!(target.velocity.y, 20.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ramp_reaches_max_multiplier() {
        let mut zone = zone();
        zone.accelerate_over_time = true;
        let mut target = Dummy::at(Vec3::ZERO);

        let mut clock = SimClock::new(0.5, 0.0);
        enter(&mut zone, &mut target, clock);
        stay(&mut zone, &mut target, clock);
        assert_abs_diff_eq!(zone.current_force(ID).y, 15.0, epsilon = 1e-4);

        for _ in 0..6 {
            clock = clock.next();
            stay(&mut zone, &mut target, clock);
        }
        assert_abs_diff_eq!(zone.current_force(ID).y, 30.0, epsilon = 1e-4);
    }

    #[test]
    fn test_exit_dampens_push_direction_only() {
        let mut zone = zone();
        let mut target = Dummy::at(Vec3::ZERO);
        let clock = SimClock::new(0.1, 0.0);
        enter(&mut zone, &mut target, clock);

        target.velocity = Vec3::new(4.0, 10.0, 0.0);
        exit(&mut zone, &mut target, clock);
        assert_abs_diff_eq!(target.velocity.x, 4.0, epsilon = 1e-5);
        assert_abs_diff_eq!(target.velocity.y, 3.0, epsilon = 1e-5);
        assert!(!zone.is_occupied());
        assert_eq!(zone.time_in_zone(ID), 0.0);
    }

    #[test]
    fn test_exit_behaviors() {
        let mut zone = zone();
        let velocity = Vec3::new(4.0, 10.0, 0.0);

        zone.exit_behavior = ExitBehavior::KeepVelocity;
        assert_eq!(zone.exit_velocity(velocity), None);

        zone.exit_behavior = ExitBehavior::ClearAllVelocity;
        assert_eq!(zone.exit_velocity(velocity), Some(Vec3::ZERO));

        zone.exit_behavior = ExitBehavior::ClearPushDirection;
        assert_eq!(zone.exit_velocity(velocity), Some(Vec3::new(4.0, 0.0, 0.0)));

        zone.exit_behavior = ExitBehavior::DampenVelocity;
        zone.only_clear_push_direction = false;
        let dampened = zone.exit_velocity(velocity).unwrap();
        assert_abs_diff_eq!(dampened.x, 1.2, epsilon = 1e-5);
        assert_abs_diff_eq!(dampened.y, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_override_mode() {
        let mut zone = zone();
        zone.override_velocity = true;
        zone.continuous = false;
        let mut target = Dummy::at(Vec3::ZERO);
        target.velocity = Vec3::new(9.0, -9.0, 9.0);

        let clock = SimClock::new(0.1, 0.0);
        enter(&mut zone, &mut target, clock);
        stay(&mut zone, &mut target, clock);
        assert_eq!(target.velocity, Vec3::new(0.0, 10.0, 0.0));
    }
}
