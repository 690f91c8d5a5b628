//! Error types for local persistence operations.

use thiserror::Error;

/// Errors returned while reading or writing the cursor store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// The configured cursor path has no file name component.
    #[error("cursor path '{path}' does not name a file")]
    InvalidPath {
        /// The offending path.
        path: String,
    },

    /// Reading the cursor file failed for a reason other than absence.
    #[error("failed to read cursor file '{path}': {message}")]
    ReadFailed {
        /// Cursor file path.
        path: String,
        /// Error detail from the filesystem.
        message: String,
    },

    /// The cursor file exists but does not contain a cursor document.
    #[error("failed to parse cursor file '{path}': {message}")]
    ParseFailed {
        /// Cursor file path.
        path: String,
        /// Error detail from `serde_json`.
        message: String,
    },

    /// Writing or replacing the cursor file failed.
    #[error("failed to write cursor file '{path}': {message}")]
    WriteFailed {
        /// Cursor file path.
        path: String,
        /// Error detail from the filesystem.
        message: String,
    },

    /// The in-memory store's lock was poisoned by a panicking writer.
    #[error("cursor store lock poisoned")]
    LockPoisoned,
}
