//! Error types for the solitaire engine
//!
//! Only configuration and I/O problems are errors. Rule violations are
//! reported through outcome enums by the controller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolitaireError {
    #[error("Level has no playfield or stack cards")]
    EmptyLevel,

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("Card not found: {0}")]
    EntityNotFound(u32),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SolitaireError>;
