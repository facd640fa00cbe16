//! Error types for corkboard
//!
//! Provides a unified error type for all operations.
//!
//! `NotFound`, `Duplicate`, `PermissionDenied`, and `InvariantViolation` are
//! expected outcomes - callers branch on them to produce user messages.
//! `Io`, `Serialization`, and `Storage` carry real faults.

use thiserror::Error;

/// Result type alias using BoardError
pub type Result<T> = std::result::Result<T, BoardError>;

/// Unified error type for corkboard operations
#[derive(Debug, Error)]
pub enum BoardError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("storage error: {0}")]
    Storage(String),

    // -------------------------------------------------------------------------
    // Expected Outcomes
    // -------------------------------------------------------------------------
    #[error("not found")]
    NotFound,

    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("permission denied: {0}")]
    PermissionDenied(Denial),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Why a modify/delete on an article was denied
///
/// The two cases stay distinct: the shell tells the user to switch boards in
/// one and that the post belongs to someone else in the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    /// The article belongs to a different board than the caller's current one
    #[error("article belongs to another board")]
    BoardMismatch,

    /// The article is owned by a different member
    #[error("article is owned by another member")]
    OwnerMismatch,
}
