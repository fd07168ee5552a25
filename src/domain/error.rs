//! Error types for the petdesk console.
//!
//! This module defines the centralized error type [`PetdeskError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use crate::domain::field::PetField;
use crate::domain::validation::Violation;
use thiserror::Error;

/// The main error type for petdesk operations.
///
/// Gateway failures are collapsed into [`PetdeskError::Transport`]: callers only
/// distinguish success from failure, never status codes or error bodies.
///
/// # Examples
///
/// ```
/// use petdesk::PetdeskError;
///
/// fn reach_service() -> Result<(), PetdeskError> {
///     Err(PetdeskError::Transport("connection refused".to_string()))
/// }
///
/// assert!(reach_service().is_err());
/// ```
#[derive(Debug, Error)]
pub enum PetdeskError {
    /// A remote gateway call failed.
    ///
    /// Covers network errors and any non-success response. The string carries
    /// a description for logs; it is never shown to the user verbatim.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The working copy in an editing session violates one or more rules.
    #[error("Validation error: {} field(s) invalid", .0.len())]
    Validation(Vec<Violation>),

    /// A field name that does not exist on a pet record.
    ///
    /// Raised at the boundary where free-form field names (command input,
    /// filter keys) are turned into [`PetField`] values.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// An attempt to edit a field that only the remote service assigns.
    #[error("Field is read-only: {0}")]
    ReadOnlyField(PetField),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A console command line could not be understood.
    #[error("Invalid command: {0}")]
    Command(String),

    /// Writing an export file failed.
    #[error("Export error: {0}")]
    Export(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for petdesk operations.
pub type Result<T> = std::result::Result<T, PetdeskError>;
