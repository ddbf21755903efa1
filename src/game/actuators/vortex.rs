// Vortex: pulls movables toward its centre, lifts them and spins them around

use std::any::Any;

use glam::Vec3;

use super::{Actuator, ActuatorContext, Volume};
use crate::game::movable::{ForceMode, Movable, TargetId};

#[derive(Debug, Clone)]
pub struct Vortex {
    name: String,
    volume: Volume,
    pull_radius: f32,
    pub pull_force: f32,
    pub lift_force: f32,
    pub spin_force: f32,
}

impl Vortex {
    pub fn new(name: impl Into<String>, center: Vec3, pull_radius: f32) -> Self {
        Self {
            name: name.into(),
            volume: Volume::sphere(center, pull_radius),
            pull_radius,
            pull_force: 50.0,
            lift_force: 20.0,
            spin_force: 30.0,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.volume.center()
    }

    pub fn pull_radius(&self) -> f32 {
        self.pull_radius
    }

    /// Acceleration acting on something at `position`; fades to zero at the rim
    pub fn force_at(&self, position: Vec3) -> Vec3 {
        if self.pull_radius <= 0.0 {
            return Vec3::ZERO;
        }
        let offset = self.center() - position;
        let factor = 1.0 - (offset.length() / self.pull_radius).clamp(0.0, 1.0);
        let to_center = offset.normalize_or_zero();

        let pull = to_center * self.pull_force;
        let lift = Vec3::Y * self.lift_force;
        let spin = Vec3::Y.cross(to_center).normalize_or_zero() * self.spin_force;
        (pull + lift + spin) * factor
    }
}

impl Actuator for Vortex {
    fn name(&self) -> &str {
        &self.name
    }

    fn volume(&self) -> &Volume {
        &self.volume
    }

    fn on_enter(&mut self, id: TargetId, _target: &mut dyn Movable, _ctx: &mut ActuatorContext) {
        log::debug!("{:?} caught by vortex '{}'", id, self.name);
    }

    fn on_stay(&mut self, _id: TargetId, target: &mut dyn Movable, ctx: &mut ActuatorContext) {
        let force = self.force_at(target.position());
        target.apply_force(force * ctx.clock.dt, ForceMode::Additive);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
