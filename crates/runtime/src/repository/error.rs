//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("snapshot repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("save slot {slot} is out of range (0..{max})")]
    InvalidSlot { slot: u32, max: u32 },

    #[error("unknown snapshot format: {0}")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
