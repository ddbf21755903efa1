// Character tuning
//
// One table holds every knob of the locomotion controller. The defaults are
// the reference tuning of the course; levels override individual fields.

use crate::engine::physics::GroundMask;

use super::stamina::StaminaConfig;

/// Locomotion tuning for a character controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    // Movement
    /// Ground/air movement speed (units/second)
    pub move_speed: f32,
    /// Speed multiplier while sprinting on the ground
    pub sprint_multiplier: f32,
    /// How fast the character turns to face its heading (slerp rate per second)
    pub rotation_speed: f32,
    /// Minimum length of the blended heading before the character steers
    pub move_deadzone: f32,

    // Glide
    /// Whether holding the glide modifier in the air glides
    pub can_glide: bool,
    /// Gravity while gliding (much weaker than `gravity`)
    pub glide_gravity: f32,
    /// Forward speed while gliding
    pub glide_speed: f32,

    // Stamina
    pub stamina: StaminaConfig,

    // Jump
    /// Apex height of a jump (units)
    pub jump_height: f32,
    /// Number of jumps before landing (1 = single, 2 = double, ...)
    pub max_jumps: u32,
    /// Gravity acceleration (negative = down)
    pub gravity: f32,
    /// Gravity multiplier while falling and not gliding
    pub fall_multiplier: f32,
    /// Vertical speed held while standing, keeps the probe in contact
    pub grounded_velocity: f32,

    // Ground detection
    /// Extra ray length below the capsule
    pub ground_check_distance: f32,
    /// Groups counted as ground
    pub ground_mask: GroundMask,

    // Dimensions
    /// Capsule height (origin at the capsule centre)
    pub height: f32,
    /// Capsule radius
    pub radius: f32,
}

/// Reference tuning
pub const DEFAULT_CONFIG: ControllerConfig = ControllerConfig {
    move_speed: 5.0,
    sprint_multiplier: 1.5,
    rotation_speed: 10.0,
    move_deadzone: 0.1,

    can_glide: true,
    glide_gravity: -2.0,
    glide_speed: 8.0,

    stamina: StaminaConfig {
        enabled: true,
        max: 100.0,
        jump_cost: 20.0,
        glide_drain: 10.0,
        regen_rate: 25.0,
    },

    jump_height: 2.0,
    max_jumps: 2,
    gravity: -9.81,
    fall_multiplier: 2.5,
    grounded_velocity: -2.0,

    ground_check_distance: 0.2,
    ground_mask: GroundMask::LEVEL,

    height: 2.0,
    radius: 0.5,
};

impl Default for ControllerConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl ControllerConfig {
    /// Length of the downward ground ray from the capsule centre
    pub fn probe_length(&self) -> f32 {
        self.height / 2.0 + self.ground_check_distance
    }
}
