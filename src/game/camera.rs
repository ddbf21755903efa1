// Orbit camera that follows the character
//
// Angles are in degrees. Positive yaw turns right, positive pitch looks down.
// The camera never writes character state; it only reads the target position.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::core::math::{look_rotation, smoothing_factor};

/// Orbit camera tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Degrees of rotation per look-axis unit
    pub sensitivity: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Distance behind the target
    pub distance: f32,
    /// Height of the offset and of the look-at point above the target
    pub height: f32,
    /// Position smoothing rate per second
    pub smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 2.0,
            min_pitch: -30.0,
            max_pitch: 60.0,
            distance: 5.0,
            height: 2.0,
            smoothing: 10.0,
        }
    }
}

/// Horizontal steering frame handed to the character controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

/// Third-person orbit camera state
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    yaw: f32,
    pitch: f32,
    position: Vec3,
    rotation: Quat,
}

impl CameraRig {
    /// Create a camera already in place behind `target`
    pub fn new(config: CameraConfig, target: Vec3) -> Self {
        Self::with_angles(config, target, 0.0, 0.0)
    }

    /// Create a camera with initial yaw/pitch (degrees)
    pub fn with_angles(config: CameraConfig, target: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut rig = Self {
            config,
            yaw,
            pitch: pitch.clamp(config.min_pitch, config.max_pitch),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        };
        rig.position = rig.desired_position(target);
        rig.look_at(target);
        rig
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn sensitivity(&self) -> f32 {
        self.config.sensitivity
    }

    /// Update sensitivity from an external settings change
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.config.sensitivity = sensitivity;
    }

    /// Accumulate pointer motion (x right, y up) into the orbit angles
    pub fn apply_pointer(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.config.sensitivity;
        self.pitch = (self.pitch - delta.y * self.config.sensitivity)
            .clamp(self.config.min_pitch, self.config.max_pitch);
    }

    /// Orbit orientation from the current angles
    pub fn orbit_rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            -self.pitch.to_radians(),
            0.0,
        )
    }

    /// Where the camera wants to be for `target`
    pub fn desired_position(&self, target: Vec3) -> Vec3 {
        target + self.orbit_rotation() * Vec3::new(0.0, self.config.height, self.config.distance)
    }

    /// Ease toward the orbit position and look at the target
    pub fn follow(&mut self, target: Vec3, dt: f32) {
        let t = smoothing_factor(self.config.smoothing, dt);
        self.position = self.position.lerp(self.desired_position(target), t);
        self.look_at(target);
    }

    fn look_at(&mut self, target: Vec3) {
        let focus = target + Vec3::Y * self.config.height;
        if let Some(rotation) = look_rotation(focus - self.position, Vec3::Y) {
            self.rotation = rotation;
        }
    }

    /// Steering frame from the camera's actual orientation
    pub fn basis(&self) -> CameraBasis {
        CameraBasis {
            forward: self.rotation * Vec3::NEG_Z,
            right: self.rotation * Vec3::X,
        }
    }

    /// World-to-view matrix for a renderer
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_config() {
        let config = CameraConfig::default();
        assert_eq!(config.sensitivity, 2.0);
        assert_eq!(config.min_pitch, -30.0);
        assert_eq!(config.max_pitch, 60.0);
    }

    #[test]
    fn test_starts_behind_target() {
        let rig = CameraRig::new(CameraConfig::default(), Vec3::ZERO);
        assert_abs_diff_eq!(rig.position().x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(rig.position().y, 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(rig.position().z, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_pointer_scaled_by_sensitivity() {
        let mut rig = CameraRig::new(CameraConfig::default(), Vec3::ZERO);
        rig.apply_pointer(Vec2::new(3.0, 1.0));
        assert_eq!(rig.yaw(), 6.0);
        assert_eq!(rig.pitch(), -2.0);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut rig = CameraRig::new(CameraConfig::default(), Vec3::ZERO);
        rig.apply_pointer(Vec2::new(0.0, -1000.0));
        assert_eq!(rig.pitch(), 60.0);
        rig.apply_pointer(Vec2::new(0.0, 1000.0));
        assert_eq!(rig.pitch(), -30.0);
    }

    #[test]
    fn test_initial_pitch_clamped() {
        let rig = CameraRig::with_angles(CameraConfig::default(), Vec3::ZERO, 0.0, 89.0);
        assert_eq!(rig.pitch(), 60.0);
    }

    #[test]
    fn test_set_sensitivity() {
        let mut rig = CameraRig::new(CameraConfig::default(), Vec3::ZERO);
        rig.set_sensitivity(0.5);
        rig.apply_pointer(Vec2::new(4.0, 0.0));
        assert_eq!(rig.yaw(), 2.0);
    }

    #[test]
    fn test_yaw_right_orbits_camera() {
        let rig = CameraRig::with_angles(CameraConfig::default(), Vec3::ZERO, 90.0, 0.0);
        // Facing +X, so the camera sits on -X
        assert_abs_diff_eq!(rig.position().x, -5.0, epsilon = 1e-4);
        assert_abs_diff_eq!(rig.basis().forward.x, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_basis_is_horizontal_when_level() {
        let rig = CameraRig::new(CameraConfig::default(), Vec3::ZERO);
        let basis = rig.basis();
        assert_abs_diff_eq!(basis.forward.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(basis.forward.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(basis.forward.z, -1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(basis.right.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_follow_smooths_toward_target() {
        let mut rig = CameraRig::new(CameraConfig::default(), Vec3::ZERO);
        let target = Vec3::new(10.0, 0.0, 0.0);

        rig.follow(target, 1.0 / 60.0);
        let x = rig.position().x;
        assert!(x > 0.0 && x < 10.0);

        for _ in 0..600 {
            rig.follow(target, 1.0 / 60.0);
        }
        assert_abs_diff_eq!(rig.position().x, 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_follow_with_zero_dt_holds_position() {
        let mut rig = CameraRig::new(CameraConfig::default(), Vec3::ZERO);
        let before = rig.position();
        rig.follow(Vec3::new(50.0, 0.0, 0.0), 0.0);
        assert_eq!(rig.position(), before);
    }

    #[test]
    fn test_view_matrix_maps_camera_to_origin() {
        let rig = CameraRig::new(CameraConfig::default(), Vec3::ZERO);
        let eye = rig.view_matrix().transform_point3(rig.position());
        assert_abs_diff_eq!(eye.length(), 0.0, epsilon = 1e-4);
    }
}
