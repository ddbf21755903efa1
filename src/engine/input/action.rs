// Game action definitions and mappings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,
    /// Sprint while grounded, glide while airborne
    Modifier,

    // Meta actions
    Pause,
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        // Movement (WASD + arrows)
        (KeyCode::KeyW, Action::MoveForward),
        (KeyCode::KeyS, Action::MoveBack),
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::ArrowUp, Action::MoveForward),
        (KeyCode::ArrowDown, Action::MoveBack),
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::Space, Action::Jump),
        (KeyCode::ShiftLeft, Action::Modifier),
        (KeyCode::Escape, Action::Pause),
    ]
}
