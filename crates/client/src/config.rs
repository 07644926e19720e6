//! Client configuration.

/// Google Calendar v3 REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Connection settings for the calendar API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, without a trailing `/calendars`.
    pub base_url: String,
    /// OAuth bearer token.
    pub access_token: Option<String>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: access_token.filter(|t| !t.trim().is_empty()),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("calctl/{}", env!("CARGO_PKG_VERSION"))
}
