//! Crate-wide error type

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BowlingError {
    /// Pin slot outside the ten-pin deck
    #[error("invalid pin index {0} (valid slots are 0..10)")]
    InvalidPin(usize),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BowlingError>;
