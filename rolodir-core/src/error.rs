//! Error types for the rolodir ecosystem.

use thiserror::Error;

/// Errors that can occur in rolodir operations.
#[derive(Error, Debug)]
pub enum RolodirError {
    #[error("Authentication required: no user is signed in")]
    AuthenticationRequired,

    #[error("Contact not found: {0}")]
    ContactNotFound(String),

    #[error("Validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Record store unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for rolodir operations.
pub type RolodirResult<T> = Result<T, RolodirError>;
