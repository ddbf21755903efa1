// Per-player input state management

use super::action::Action;
use glam::Vec2;
use std::collections::HashSet;

/// Pointer pixels to look-axis units
const POINTER_AXIS_SCALE: f32 = 0.1;

/// Input consumed by one simulation tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerInput {
    /// x = strafe (right positive), y = forward (forward positive), each in [-1, 1]
    pub move_axis: Vec2,
    /// Rising edge of the jump button
    pub jump_pressed: bool,
    /// Sprint modifier held
    pub sprint: bool,
    /// Glide modifier held
    pub glide: bool,
    /// Pointer movement in look-axis units since the last tick
    pub look_delta: Vec2,
}

/// Represents the input state for the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions pressed since the last tick consumed them
    just_pressed: HashSet<Action>,

    /// Pointer movement not yet consumed
    look_accumulator: Vec2,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed since the last consumed snapshot
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Accumulate raw pointer motion (pixels, y down)
    pub(crate) fn add_pointer_motion(&mut self, dx: f64, dy: f64) {
        // Screen y grows downward; look-up is positive
        self.look_accumulator += Vec2::new(dx as f32, -dy as f32) * POINTER_AXIS_SCALE;
    }

    /// Get directional input, (strafe, forward) in [-1, 1]
    pub fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;

        if self.is_pressed(Action::MoveLeft) {
            axis.x -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            axis.x += 1.0;
        }
        if self.is_pressed(Action::MoveBack) {
            axis.y -= 1.0;
        }
        if self.is_pressed(Action::MoveForward) {
            axis.y += 1.0;
        }

        axis
    }

    /// Build the input for the next tick. Edges and pointer motion are
    /// handed out once.
    pub fn take_snapshot(&mut self) -> ControllerInput {
        let modifier = self.is_pressed(Action::Modifier);
        let snapshot = ControllerInput {
            move_axis: self.move_axis(),
            jump_pressed: self.just_pressed(Action::Jump),
            sprint: modifier,
            glide: modifier,
            look_delta: self.look_accumulator,
        };

        self.just_pressed.clear();
        self.look_accumulator = Vec2::ZERO;
        snapshot
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.look_accumulator = Vec2::ZERO;
    }
}
