//! HTTP client for the calendar API.

pub mod events;

use reqwest::{header, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// HTTP client for the calendar API.
#[derive(Debug, Clone)]
pub struct CalendarClient {
    client: reqwest::Client,
    base_url: Url,
}

/// Error envelope returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CalendarClient {
    /// Create a new client from the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let token = config.access_token.as_deref().ok_or(ClientError::MissingToken)?;
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        let mut headers = header::HeaderMap::new();
        let mut auth =
            header::HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ClientError::InvalidInput("access token contains invalid characters".to_string())
            })?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Build the URL of an event collection or resource:
    /// `{base}/calendars/{calendar_id}/events[/{segment}...]`.
    ///
    /// Segments are percent-encoded, so calendar IDs that are email
    /// addresses are safe to pass as-is.
    fn events_url(&self, calendar_id: &str, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push("calendars")
                .push(calendar_id)
                .push("events")
                .extend(segments);
        }
        url
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
        } else {
            Err(Self::error_from(response, status, resource).await)
        }
    }

    /// Handle delete responses (no body expected).
    async fn handle_delete_response(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response, status, resource).await)
        }
    }

    async fn error_from(
        response: reqwest::Response,
        status: StatusCode,
        resource: &str,
    ) -> ClientError {
        if status == StatusCode::NOT_FOUND {
            return ClientError::NotFound {
                resource: resource.to_string(),
            };
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        ClientError::ServerError {
            status: status.as_u16(),
            message: error_message(&body),
        }
    }
}

/// Extracts the human-readable message from an API error body, falling back
/// to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    fn client() -> CalendarClient {
        CalendarClient::new(&ClientConfig::new(
            DEFAULT_BASE_URL,
            Some("token".to_string()),
        ))
        .unwrap()
    }

    #[test]
    fn test_new_requires_token() {
        let result = CalendarClient::new(&ClientConfig::new(DEFAULT_BASE_URL, None));
        assert!(matches!(result, Err(ClientError::MissingToken)));
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let result = CalendarClient::new(&ClientConfig::new(
            "not a url",
            Some("token".to_string()),
        ));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_events_url_encodes_calendar_id() {
        let url = client().events_url("team@group.calendar.google.com", &[]);
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/team@group.calendar.google.com/events"
        );

        let url = client().events_url("primary", &["abc 1", "instances"]);
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/primary/events/abc%201/instances"
        );
    }

    #[test]
    fn test_events_url_trailing_slash() {
        let client = CalendarClient::new(&ClientConfig::new(
            "http://localhost:8080/calendar/v3/",
            Some("token".to_string()),
        ))
        .unwrap();
        assert_eq!(
            client.events_url("primary", &["E1"]).as_str(),
            "http://localhost:8080/calendar/v3/calendars/primary/events/E1"
        );
    }

    #[test]
    fn test_error_message_from_api_body() {
        let body = r#"{"error": {"code": 403, "message": "Insufficient Permission", "errors": []}}"#;
        assert_eq!(error_message(body), "Insufficient Permission");
        assert_eq!(error_message(" Bad Gateway \n"), "Bad Gateway");
    }
}
