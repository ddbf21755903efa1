// Moving platforms
//
// Kinematic bodies that travel a closed loop of waypoints at constant speed.
// The character rider only sees the resulting surface position.

use glam::Vec3;

use crate::engine::physics::body::presets;
use crate::engine::physics::{PhysicsWorld, RigidBodyHandle, SurfaceId};

#[derive(Debug, Clone)]
pub struct MovingPlatform {
    surface: SurfaceId,
    body: RigidBodyHandle,
    /// Loop of points; the first one is the start position
    path: Vec<Vec3>,
    speed: f32,
    next: usize,
    position: Vec3,
}

impl MovingPlatform {
    /// Create a platform at `start` in `physics`
    pub fn new(physics: &mut PhysicsWorld, start: Vec3, half_extents: Vec3, speed: f32) -> Self {
        let body = physics.add_rigid_body(presets::platform_body(start));
        let surface = physics.attach_surface(body, presets::platform_collider(half_extents));

        Self {
            surface,
            body,
            path: vec![start],
            speed,
            next: 0,
            position: start,
        }
    }

    /// Append a point to the loop
    pub fn with_waypoint(mut self, point: Vec3) -> Self {
        self.path.push(point);
        if self.next == 0 {
            self.next = 1;
        }
        self
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Travel `speed * dt` along the loop and queue the new position
    pub fn advance(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        if self.path.len() < 2 || dt <= 0.0 {
            return;
        }

        let mut remaining = self.speed * dt;
        // Bounded so a loop of coincident points cannot spin forever
        for _ in 0..=self.path.len() {
            if remaining <= 0.0 {
                break;
            }
            let target = self.path[self.next];
            let to_target = target - self.position;
            let distance = to_target.length();

            if distance <= remaining {
                self.position = target;
                remaining -= distance;
                self.next = (self.next + 1) % self.path.len();
            } else {
                self.position += to_target / distance * remaining;
                remaining = 0.0;
            }
        }

        physics.set_kinematic_target(self.body, self.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::CollisionWorld;
    use approx::assert_abs_diff_eq;

    fn platform(physics: &mut PhysicsWorld) -> MovingPlatform {
        MovingPlatform::new(physics, Vec3::ZERO, Vec3::new(1.0, 0.25, 1.0), 2.0)
            .with_waypoint(Vec3::new(4.0, 0.0, 0.0))
    }

    #[test]
    fn test_moves_toward_waypoint() {
        let mut physics = PhysicsWorld::new();
        let mut platform = platform(&mut physics);

        platform.advance(&mut physics, 0.5);
        physics.step(0.5);

        assert_abs_diff_eq!(platform.position().x, 1.0, epsilon = 1e-5);
        let surface = physics.surface_position(platform.surface()).unwrap();
        assert_abs_diff_eq!(surface.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_loops_back_to_start() {
        let mut physics = PhysicsWorld::new();
        let mut platform = platform(&mut physics);

        // 4 out, 1 back
        platform.advance(&mut physics, 2.5);
        assert_abs_diff_eq!(platform.position().x, 3.0, epsilon = 1e-5);

        platform.advance(&mut physics, 1.5);
        assert_abs_diff_eq!(platform.position().x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_single_point_stays_put() {
        let mut physics = PhysicsWorld::new();
        let mut platform = MovingPlatform::new(&mut physics, Vec3::ONE, Vec3::ONE, 5.0);
        platform.advance(&mut physics, 1.0);
        assert_eq!(platform.position(), Vec3::ONE);
    }
}
