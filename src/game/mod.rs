//! The game engine: settings, lifecycle errors, and the state machine.

pub mod engine;
pub mod error;
pub mod settings;

pub use engine::{Game, GameState};
pub use error::GameError;
pub use settings::GameSettings;
