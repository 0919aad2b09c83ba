//! Error types for Latinitas

use thiserror::Error;

/// Errors surfaced by the service
#[derive(Error, Debug)]
pub enum LatinitasError {
    /// A required request field is missing or empty
    #[error("{field} is required")]
    InvalidInput {
        /// Name of the offending field, as it appears on the wire
        field: &'static str,
    },

    /// MongoDB operation failed; requests fail independently, the process stays up
    #[error("Database error: {0}")]
    Database(String),

    /// The external translation provider failed or returned an unusable response
    #[error("Translation failed: {0}")]
    Translation(String),

    /// GOOGLE_TRANSLATE_API_KEY was not configured
    #[error("API key not configured")]
    MissingApiKey,

    /// Startup or invariant failure inside the service itself
    #[error("Internal error: {0}")]
    Internal(String),

    /// Route or resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O error (listener setup)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LatinitasError>;
