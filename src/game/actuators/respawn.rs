// Respawn zone: sends whatever falls in back to a checkpoint

use std::any::Any;

use glam::{EulerRot, Quat, Vec3};

use super::{Actuator, ActuatorContext, Volume};
use crate::game::error::{Misconfiguration, WarningLog};
use crate::game::movable::{ForceMode, Movable, TargetId};
use crate::game::scheduler::DeferredAction;

/// Where and how to put a movable back
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnRequest {
    pub position: Vec3,
    pub rotation: Option<Quat>,
    pub reset_velocity: bool,
}

impl RespawnRequest {
    pub fn apply(&self, target: &mut dyn Movable) {
        target.teleport(self.position, self.rotation);
        if self.reset_velocity {
            target.apply_force(Vec3::ZERO, ForceMode::Override);
        }
    }
}

#[derive(Debug)]
pub struct RespawnZone {
    name: String,
    volume: Volume,
    respawn_point: Option<Vec3>,
    pub reset_velocity: bool,
    /// Euler angles in degrees (pitch, yaw, roll) applied on respawn
    pub reset_rotation: Option<Vec3>,
    /// Seconds between trigger and teleport
    pub respawn_delay: f32,
    /// Fade out before and fade in after the teleport, in seconds
    pub fade_duration: Option<f32>,
    busy_until: Option<f64>,
    warnings: WarningLog,
}

impl RespawnZone {
    pub fn new(name: impl Into<String>, volume: Volume, respawn_point: Option<Vec3>) -> Self {
        let name = name.into();
        let mut warnings = WarningLog::new();
        if respawn_point.is_none() {
            warnings.warn(Misconfiguration::MissingRespawnPoint(name.clone()));
        }

        Self {
            name,
            volume,
            respawn_point,
            reset_velocity: true,
            reset_rotation: None,
            respawn_delay: 0.0,
            fade_duration: None,
            busy_until: None,
            warnings,
        }
    }

    pub fn respawn_point(&self) -> Option<Vec3> {
        self.respawn_point
    }

    pub fn set_respawn_point(&mut self, point: Vec3) {
        log::info!("Respawn zone '{}' now returns to {}", self.name, point);
        self.respawn_point = Some(point);
    }

    /// Whether a delayed respawn sequence is still running at `now`
    pub fn is_busy(&self, now: f64) -> bool {
        self.busy_until.is_some_and(|until| now < until)
    }

    fn request(&mut self) -> Option<RespawnRequest> {
        let Some(position) = self.respawn_point else {
            self.warnings
                .warn(Misconfiguration::MissingRespawnPoint(self.name.clone()));
            return None;
        };

        let rotation = self.reset_rotation.map(|degrees| {
            Quat::from_euler(
                EulerRot::YXZ,
                degrees.y.to_radians(),
                degrees.x.to_radians(),
                degrees.z.to_radians(),
            )
        });

        Some(RespawnRequest {
            position,
            rotation,
            reset_velocity: self.reset_velocity,
        })
    }

    /// Respawn `target` right away, ignoring any delay
    pub fn respawn_now(&mut self, target: &mut dyn Movable) {
        if let Some(request) = self.request() {
            request.apply(target);
        }
    }
}

impl Actuator for RespawnZone {
    fn name(&self) -> &str {
        &self.name
    }

    fn volume(&self) -> &Volume {
        &self.volume
    }

    fn on_enter(&mut self, id: TargetId, target: &mut dyn Movable, ctx: &mut ActuatorContext) {
        let now = ctx.clock.time;
        if self.is_busy(now) {
            return;
        }
        let Some(request) = self.request() else {
            return;
        };

        if self.respawn_delay <= 0.0 {
            request.apply(target);
            log::info!("{:?} respawned at {}", id, request.position);
            return;
        }

        let fade = self.fade_duration.unwrap_or(0.0) as f64;
        let teleport_at = now + fade + self.respawn_delay as f64;
        ctx.deferred.schedule(
            teleport_at,
            DeferredAction::Respawn {
                target: id,
                request,
            },
        );
        self.busy_until = Some(teleport_at + fade);
        log::info!("{:?} respawning in {:.2}s", id, teleport_at - now);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
