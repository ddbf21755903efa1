// Moving platform riding
//
// The rider never looks at how a surface moves. It remembers where the
// supporting surface was last tick and hands back the difference.

use glam::Vec3;

use crate::engine::physics::{CollisionWorld, SurfaceId};

/// Surface currently being ridden and where it was last seen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformAnchor {
    pub surface: SurfaceId,
    pub last_position: Vec3,
}

#[derive(Debug, Default)]
pub struct PlatformRider {
    anchor: Option<PlatformAnchor>,
}

impl PlatformRider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<PlatformAnchor> {
        self.anchor
    }

    /// Forget the current surface
    pub fn clear(&mut self) {
        self.anchor = None;
    }

    /// Track `support` and return the translation to apply to the character.
    ///
    /// A newly found surface is only recorded; the character moves with it
    /// from the following tick on.
    pub fn update(&mut self, support: Option<SurfaceId>, world: &dyn CollisionWorld) -> Vec3 {
        let Some((surface, position)) =
            support.and_then(|s| world.surface_position(s).map(|p| (s, p)))
        else {
            self.anchor = None;
            return Vec3::ZERO;
        };

        if let Some(anchor) = self.anchor.as_mut().filter(|a| a.surface == surface) {
            let delta = position - anchor.last_position;
            anchor.last_position = position;
            return delta;
        }

        log::debug!("Riding surface {:?}", surface);
        self.anchor = Some(PlatformAnchor {
            surface,
            last_position: position,
        });
        Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::testing::FlatWorld;

    #[test]
    fn test_new_surface_records_without_moving() {
        let world = FlatWorld::new(0.0);
        let mut rider = PlatformRider::new();

        let delta = rider.update(Some(world.surface), &world);
        assert_eq!(delta, Vec3::ZERO);
        assert_eq!(rider.anchor().unwrap().surface, world.surface);
    }

    #[test]
    fn test_same_surface_yields_its_delta() {
        let mut world = FlatWorld::new(0.0);
        let mut rider = PlatformRider::new();
        rider.update(Some(world.surface), &world);

        world.move_surface(Vec3::new(0.5, 0.0, -0.25));
        let delta = rider.update(Some(world.surface), &world);
        assert_eq!(delta, Vec3::new(0.5, 0.0, -0.25));

        // Recorded position follows the surface
        assert_eq!(rider.update(Some(world.surface), &world), Vec3::ZERO);
    }

    #[test]
    fn test_losing_support_clears_anchor() {
        let world = FlatWorld::new(0.0);
        let mut rider = PlatformRider::new();
        rider.update(Some(world.surface), &world);

        assert_eq!(rider.update(None, &world), Vec3::ZERO);
        assert!(rider.anchor().is_none());
    }

    #[test]
    fn test_unknown_surface_clears_anchor() {
        let world = FlatWorld::new(0.0);
        let mut rider = PlatformRider::new();
        rider.update(Some(world.surface), &world);

        assert_eq!(rider.update(Some(SurfaceId(999)), &world), Vec3::ZERO);
        assert!(rider.anchor().is_none());
    }
}
