// Game systems: character, camera, actuators and the tick pipeline

pub mod actuators;
pub mod camera;
pub mod character;
pub mod error;
pub mod level;
pub mod movable;
pub mod platform;
pub mod scheduler;
pub mod settings;
pub mod simulation;

pub use simulation::{ActuatorOrdering, Simulation};
