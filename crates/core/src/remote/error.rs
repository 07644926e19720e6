use thiserror::Error;

/// Errors reported by the remote calendar service or the transport to it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Event not found: {id}")]
    NotFound { id: String },
    #[error("Calendar API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for remote calls.
pub type Result<T> = std::result::Result<T, RemoteError>;
