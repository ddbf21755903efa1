// Input handling system
//
// Translates winit keyboard and pointer events into per-tick controller input.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `player`: Held/edge state and pointer accumulation for the local player
// - `manager`: Routes winit events to the player
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::new();
//
// // In your event loop
// input.process_keyboard_event(&key_event);
// input.process_pointer_motion(delta);
//
// // Once per simulation tick
// let controller_input = input.snapshot();
// ```

pub mod action;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::Action;
pub use manager::InputManager;
pub use player::{ControllerInput, PlayerInput};
