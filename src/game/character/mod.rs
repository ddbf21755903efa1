// Character system
//
// This module contains the third-person character:
// - Tunable movement configuration
// - Stamina pool gating jumps and gliding
// - Ground probe and moving-platform rider
// - Locomotion state and the controller that drives it each tick

pub mod config;
pub mod controller;
pub mod probe;
pub mod rider;
pub mod stamina;
pub mod state;

// Re-export commonly used types
pub use config::ControllerConfig;
pub use controller::CharacterController;
pub use probe::GroundProbeResult;
pub use rider::PlatformRider;
pub use stamina::{StaminaConfig, StaminaPool};
pub use state::{CharacterState, LocomotionState};
