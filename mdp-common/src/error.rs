//! Common error types for the MDP survey service

use thiserror::Error;

/// Common result type for survey operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the kernel and the HTTP service
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or incomplete response set, rejected before scoring
    #[error("Validation error: {0}")]
    Validation(String),

    /// An evaluation already exists for this participant at this rotation
    #[error("{0}")]
    DuplicateRotation(String),

    /// The participant has already completed this function
    #[error("{0}")]
    DuplicateFunction(String),

    /// Storage write failed; prior state is intact
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
