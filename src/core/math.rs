// Math utilities and helper functions

use glam::{Mat3, Quat, Vec3};

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Project a vector onto the horizontal (XZ) plane and normalize it.
/// Returns zero when the vector is vertical or zero.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Rotation whose forward axis (-Z) points along `forward`, with `up` as the
/// reference up vector. `None` if `forward` is zero or parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let f = forward.try_normalize()?;
    let right = f.cross(up).try_normalize()?;
    let true_up = right.cross(f);
    Some(Quat::from_mat3(&Mat3::from_cols(right, true_up, -f)))
}

/// Interpolation factor for frame-rate independent exponential smoothing.
/// `rate` is the convergence rate per second; `dt = 0` yields 0.
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Launch speed that reaches `height` under a gravity of magnitude `|gravity|`.
pub fn launch_speed(height: f32, gravity: f32) -> f32 {
    (2.0 * height * gravity.abs()).sqrt()
}
