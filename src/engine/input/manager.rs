// Input manager - maps winit events onto player actions

use super::action::{default_bindings, Action};
use super::player::{ControllerInput, PlayerInput};
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Routes keyboard and pointer events to the local player
pub struct InputManager {
    bindings: HashMap<KeyCode, Action>,
    player: PlayerInput,
    pause_requested: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            player: PlayerInput::new(),
            pause_requested: false,
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            // Only register if not a key repeat
            if event.repeat {
                return;
            }
            self.process_key(key_code, event.state);
        }
    }

    fn process_key(&mut self, key_code: KeyCode, state: ElementState) {
        let Some(&action) = self.bindings.get(&key_code) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                if action == Action::Pause {
                    self.pause_requested = true;
                } else {
                    self.player.press(action);
                }
            }
            ElementState::Released => self.player.release(action),
        }
    }

    /// Process raw pointer motion (winit `DeviceEvent::MouseMotion`)
    pub fn process_pointer_motion(&mut self, delta: (f64, f64)) {
        self.player.add_pointer_motion(delta.0, delta.1);
    }

    /// Returns true once per pause key press
    pub fn take_pause_request(&mut self) -> bool {
        std::mem::take(&mut self.pause_requested)
    }

    /// Input for the next simulation tick
    pub fn snapshot(&mut self) -> ControllerInput {
        self.player.take_snapshot()
    }

    /// Drop held keys (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.player.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
