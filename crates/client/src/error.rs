//! Client error types.

use calctl_core::event::EventError;
use calctl_core::remote::RemoteError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Calendar API returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Missing access token (pass --access-token or set CALCTL_ACCESS_TOKEN)")]
    MissingToken,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Aborted")]
    Aborted,

    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl From<ClientError> for RemoteError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::NotFound { resource } => RemoteError::NotFound { id: resource },
            ClientError::ServerError { status, message } => RemoteError::Api { status, message },
            ClientError::InvalidResponse(message) => RemoteError::InvalidResponse(message),
            ClientError::Remote(e) => e,
            ClientError::Event(EventError::Remote(e)) => e,
            other => RemoteError::Transport(other.to_string()),
        }
    }
}
