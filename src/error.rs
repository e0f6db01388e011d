//! Error types for the Hogwarts engine
//!
//! Only definition and programmer errors live here. Rule violations are
//! reported through [`crate::game::Outcome::Rejected`] instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("{name} has no {hook} hook")]
    MissingHook { name: String, hook: &'static str },

    #[error("Entity not found: {0}")]
    EntityNotFound(u32),

    #[error("Invalid game setup: {0}")]
    InvalidSetup(String),

    #[error("{op} needs a nonzero amount")]
    ZeroAmount { op: &'static str },

    #[error("Callback dispatch exceeded depth {0}")]
    CallbackDepthExceeded(u32),

    #[error("No valid choice for '{prompt}' after {attempts} attempts")]
    ChoiceExhausted { prompt: String, attempts: u32 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
