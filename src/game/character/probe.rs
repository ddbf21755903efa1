// Ground probe

use glam::Vec3;

use crate::engine::physics::{CollisionWorld, GroundMask, SurfaceId};

/// One tick's answer to "is the character standing on something?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroundProbeResult {
    pub grounded: bool,
    /// Supporting surface, when the hit collider is a registered surface
    pub surface: Option<SurfaceId>,
}

impl GroundProbeResult {
    pub fn airborne() -> Self {
        Self::default()
    }
}

/// Cast straight down from `position` for `probe_length` against `mask`.
///
/// Without a collision world the character is reported airborne.
pub fn probe(
    world: Option<&dyn CollisionWorld>,
    position: Vec3,
    probe_length: f32,
    mask: GroundMask,
) -> GroundProbeResult {
    let Some(world) = world else {
        return GroundProbeResult::airborne();
    };

    match world.cast_down(position, probe_length, mask) {
        Some(hit) => GroundProbeResult {
            grounded: true,
            surface: hit.surface,
        },
        None => GroundProbeResult::airborne(),
    }
}
