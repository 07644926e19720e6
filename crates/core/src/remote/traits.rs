use async_trait::async_trait;

use crate::event::{Event, EventPatch};

use super::Result;

/// Query options for inserting an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertOptions {
    /// Guest notification mode (`all`, `externalOnly`, `none`).
    pub send_updates: Option<String>,
    /// Must be set when the event carries a conference create request.
    pub conference_data_version: Option<u8>,
    /// Must be set when the event carries attachments.
    pub supports_attachments: bool,
}

/// The remote calendar service's event resource contract.
///
/// Every call is a single request; implementations do not retry.
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// Gets an event (series master, single event or instance) by its ID.
    async fn get_event(&self, calendar_id: &str, event_id: &str) -> Result<Event>;

    /// Lists the expanded instances of a recurring event.
    ///
    /// With `original_start` set, the service narrows the result to the
    /// instance generated for that start time.
    async fn list_instances(
        &self,
        calendar_id: &str,
        event_id: &str,
        original_start: Option<&str>,
    ) -> Result<Vec<Event>>;

    /// Creates a new event.
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &Event,
        options: &InsertOptions,
    ) -> Result<Event>;

    /// Partially updates an event; unset patch fields are left unchanged.
    async fn patch_event(&self, calendar_id: &str, event_id: &str, patch: &EventPatch)
        -> Result<Event>;

    /// Deletes an event by its ID.
    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()>;
}
