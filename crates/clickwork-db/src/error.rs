//! Error types for database operations.

use clickwork_core::PlayerId;
use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored row could not be mapped back to engine state.
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// An operation was invoked for a player that was never created.
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// Engine fault surfaced through a session operation.
    #[error(transparent)]
    Engine(#[from] clickwork_core::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;
