use thiserror::Error;

use crate::remote::RemoteError;

/// Errors that can occur while validating or applying an event mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// Bad flag combination, attribute value or recurrence rule.
    #[error("{0}")]
    Validation(String),
    /// No recurring instance matched the requested original start.
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// The instance was already mutated but the series master could not be
    /// truncated; the two now overlap until the master is patched again.
    #[error(
        "instance {instance_id} was changed but truncating the recurrence of series {series_id} failed: {source}"
    )]
    ParentTruncation {
        series_id: String,
        instance_id: String,
        source: RemoteError,
    },
}

impl EventError {
    pub fn validation(message: impl Into<String>) -> Self {
        EventError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        EventError::NotFound(message.into())
    }
}

/// Result type for event operations.
pub type Result<T> = std::result::Result<T, EventError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        assert_eq!(
            EventError::validation("no updates provided").to_string(),
            "no updates provided"
        );
    }

    #[test]
    fn test_remote_is_transparent() {
        let error: EventError = RemoteError::Transport("timeout".to_string()).into();
        assert_eq!(error.to_string(), "Request failed: timeout");
    }

    #[test]
    fn test_parent_truncation_display() {
        let error = EventError::ParentTruncation {
            series_id: "E1".to_string(),
            instance_id: "E1_20240304T090000Z".to_string(),
            source: RemoteError::Api {
                status: 500,
                message: "Backend Error".to_string(),
            },
        };
        assert_eq!(
            error.to_string(),
            "instance E1_20240304T090000Z was changed but truncating the recurrence of series E1 failed: Calendar API returned 500: Backend Error"
        );
    }
}
