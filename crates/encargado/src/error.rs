//! Error types for encargado.
//!
//! Only infrastructure failures and caller-side validation produce errors.
//! Lookups that find nothing inside the data operations layer are reported as
//! [`crate::ops::Outcome::NotFound`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for encargado operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Input Errors ===
    /// User input was rejected before reaching the store.
    #[error("invalid {field}: {message}")]
    Validation {
        /// The input that was rejected.
        field: &'static str,
        /// Why it was rejected.
        message: String,
    },

    /// No zone matches the given id or id prefix.
    #[error("zone not found: {0}")]
    ZoneNotFound(String),

    /// No event matches the given id or id prefix.
    #[error("event not found: {0}")]
    EventNotFound(String),

    /// An id prefix matched more than one record.
    #[error("ambiguous id prefix '{prefix}' matches {matches} records")]
    AmbiguousId {
        /// The prefix that was given.
        prefix: String,
        /// How many records it matched.
        matches: usize,
    },

    /// The administrator password did not match.
    #[error("incorrect administrator password")]
    AccessDenied,

    // === Photo Errors ===
    /// A photo could not be decoded or re-encoded.
    #[error("failed to process photo: {0}")]
    Photo(#[from] image::ImageError),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for encargado operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new validation error.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error was caused by rejected user input.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error means a referenced record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ZoneNotFound(_) | Self::EventNotFound(_))
    }
}
