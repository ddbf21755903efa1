// Character locomotion state

use glam::{Quat, Vec3};

/// Coarse locomotion state, derived each tick from grounded/gliding flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocomotionState {
    /// Supported by ground
    #[default]
    Grounded,
    /// In the air under normal (or fall-multiplied) gravity
    Airborne,
    /// In the air, held glide modifier, under glide gravity
    Gliding,
}

impl LocomotionState {
    pub fn from_flags(grounded: bool, gliding: bool) -> Self {
        match (grounded, gliding) {
            (true, _) => Self::Grounded,
            (false, true) => Self::Gliding,
            (false, false) => Self::Airborne,
        }
    }

    /// Check if the character is on the ground
    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Grounded)
    }

    /// Gliding counts as airborne for gravity and steering
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Airborne | Self::Gliding)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Grounded => "grounded",
            Self::Airborne => "airborne",
            Self::Gliding => "gliding",
        }
    }
}

/// Authoritative per-character state. Only the controller writes it.
#[derive(Debug, Clone)]
pub struct CharacterState {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub grounded: bool,
    /// Jumps performed since last landing, `0..=max_jumps`
    pub jump_count: u32,
    pub is_gliding: bool,
}

impl CharacterState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            grounded: false,
            jump_count: 0,
            is_gliding: false,
        }
    }

    pub fn locomotion(&self) -> LocomotionState {
        LocomotionState::from_flags(self.grounded, self.is_gliding)
    }

    /// Horizontal forward direction of the character (-Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

/// Tracks locomotion state changes across ticks
#[derive(Debug, Default)]
pub struct StateTracker {
    current: LocomotionState,
    previous: LocomotionState,
    state_time: f32,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> LocomotionState {
        self.current
    }

    /// Get the previous state
    pub fn previous_state(&self) -> LocomotionState {
        self.previous
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Record this tick's state; returns true on a change
    pub fn update(&mut self, state: LocomotionState, dt: f32) -> bool {
        if state != self.current {
            self.previous = self.current;
            self.current = state;
            self.state_time = 0.0;
            log::debug!("Locomotion {} -> {}", self.previous.name(), state.name());
            true
        } else {
            self.state_time += dt;
            false
        }
    }
}
