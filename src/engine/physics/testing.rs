// Scripted collision world for deterministic controller tests

use glam::Vec3;

use super::{CollisionWorld, GroundMask, SurfaceHit, SurfaceId};

/// Infinite horizontal floor at `floor_y`, reported as one surface whose
/// position can be moved by the test. The character capsule is treated as a
/// point at `half_height` above its feet.
pub struct FlatWorld {
    pub floor_y: f32,
    pub half_height: f32,
    pub surface: SurfaceId,
    surface_position: Vec3,
}

impl FlatWorld {
    pub fn new(floor_y: f32) -> Self {
        Self {
            floor_y,
            half_height: 1.0,
            surface: SurfaceId(7),
            surface_position: Vec3::new(0.0, floor_y, 0.0),
        }
    }

    /// Translate the floor surface (vertical part also moves the floor)
    pub fn move_surface(&mut self, delta: Vec3) {
        self.surface_position += delta;
        self.floor_y += delta.y;
    }

    /// Origin height of a character standing on the floor
    pub fn standing_height(&self) -> f32 {
        self.floor_y + self.half_height
    }
}

impl CollisionWorld for FlatWorld {
    fn cast_down(&self, origin: Vec3, max_distance: f32, mask: GroundMask) -> Option<SurfaceHit> {
        let distance = origin.y - self.floor_y;
        (!mask.is_empty() && distance >= 0.0 && distance <= max_distance).then_some(SurfaceHit {
            surface: Some(self.surface),
            distance,
        })
    }

    fn sweep(&self, position: Vec3, translation: Vec3, mask: GroundMask) -> Vec3 {
        let mut moved = translation;
        let lowest = self.standing_height();
        if !mask.is_empty() && position.y + moved.y < lowest {
            moved.y = (lowest - position.y).min(0.0);
        }
        moved
    }

    fn surface_position(&self, surface: SurfaceId) -> Option<Vec3> {
        (surface == self.surface).then_some(self.surface_position)
    }
}
