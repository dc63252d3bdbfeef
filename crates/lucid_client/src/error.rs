//! Error types for Lucid client operations.

use thiserror::Error;

/// Errors that can occur when talking to a Lucid endpoint.
#[derive(Error, Debug)]
pub enum LucidError {
    /// `init()` was called on a client that is already initialized (or initializing)
    #[error("The Lucid API wrapper instance is already initialized.")]
    AlreadyInitialized,

    /// A key-value operation was attempted before `init()` succeeded
    #[error("The Lucid API wrapper instance was not initialized.")]
    NotInitialized,

    /// The version probe failed or did not answer like a Lucid server
    #[error("Error - Endpoint could not be determined to be a Lucid endpoint.")]
    InvalidEndpoint,

    /// The configured token was rejected by `check-token`
    #[error("Error {status} - {message}")]
    AuthCheckFailed { status: u16, message: String },

    /// A key-value operation was attempted without a token
    #[error("You must be logged in to request a key-value pair.")]
    NotLoggedIn,

    /// Body/method combination the remote does not accept
    #[error("{0}")]
    InvalidRequestShape(String),

    /// Not a valid HTTP method token
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// A key-value request came back with a non-2xx status
    #[error("Error {status} - {message}")]
    RemoteError { status: u16, message: String },

    /// Configuration error (invalid env values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LucidError {
    /// HTTP status carried by remote failures, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            LucidError::AuthCheckFailed { status, .. } | LucidError::RemoteError { status, .. } => {
                Some(*status)
            }
            LucidError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for Lucid client operations.
pub type Result<T> = std::result::Result<T, LucidError>;
