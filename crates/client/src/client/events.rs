//! Event API operations.

use async_trait::async_trait;
use calctl_core::event::{Event, EventPatch};
use calctl_core::remote::{self, EventsApi, InsertOptions};
use serde::Deserialize;

use super::CalendarClient;
use crate::error::Result;

/// One page of `events.instances`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstancesPage {
    #[serde(default)]
    items: Vec<Event>,
}

impl CalendarClient {
    /// Get an event by ID.
    pub async fn get_event(&self, calendar_id: &str, event_id: &str) -> Result<Event> {
        let url = self.events_url(calendar_id, &[event_id]);
        tracing::debug!(%url, "GET event");
        let response = self.client.get(url).send().await?;
        self.handle_response(response, &format!("event {event_id}"))
            .await
    }

    /// List the instances of a recurring event, optionally only the one
    /// generated for `original_start`.
    pub async fn list_instances(
        &self,
        calendar_id: &str,
        event_id: &str,
        original_start: Option<&str>,
    ) -> Result<Vec<Event>> {
        let url = self.events_url(calendar_id, &[event_id, "instances"]);
        tracing::debug!(%url, original_start, "GET instances");
        let mut request = self.client.get(url);
        if let Some(original_start) = original_start {
            request = request.query(&[("originalStart", original_start)]);
        }
        let response = request.send().await?;
        let page: InstancesPage = self
            .handle_response(response, &format!("event {event_id}"))
            .await?;
        Ok(page.items)
    }

    /// Create a new event.
    pub async fn insert_event(
        &self,
        calendar_id: &str,
        event: &Event,
        options: &InsertOptions,
    ) -> Result<Event> {
        let url = self.events_url(calendar_id, &[]);
        tracing::debug!(%url, "POST event");
        let mut request = self.client.post(url).json(event);
        if let Some(send_updates) = &options.send_updates {
            request = request.query(&[("sendUpdates", send_updates)]);
        }
        if let Some(version) = options.conference_data_version {
            request = request.query(&[("conferenceDataVersion", version)]);
        }
        if options.supports_attachments {
            request = request.query(&[("supportsAttachments", true)]);
        }
        let response = request.send().await?;
        self.handle_response(response, &format!("calendar {calendar_id}"))
            .await
    }

    /// Partially update an event.
    pub async fn patch_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        patch: &EventPatch,
    ) -> Result<Event> {
        let url = self.events_url(calendar_id, &[event_id]);
        tracing::debug!(%url, "PATCH event");
        let response = self.client.patch(url).json(patch).send().await?;
        self.handle_response(response, &format!("event {event_id}"))
            .await
    }

    /// Delete an event by ID.
    pub async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()> {
        let url = self.events_url(calendar_id, &[event_id]);
        tracing::debug!(%url, "DELETE event");
        let response = self.client.delete(url).send().await?;
        self.handle_delete_response(response, &format!("event {event_id}"))
            .await
    }
}

#[async_trait]
impl EventsApi for CalendarClient {
    async fn get_event(&self, calendar_id: &str, event_id: &str) -> remote::Result<Event> {
        Ok(CalendarClient::get_event(self, calendar_id, event_id).await?)
    }

    async fn list_instances(
        &self,
        calendar_id: &str,
        event_id: &str,
        original_start: Option<&str>,
    ) -> remote::Result<Vec<Event>> {
        Ok(CalendarClient::list_instances(self, calendar_id, event_id, original_start).await?)
    }

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &Event,
        options: &InsertOptions,
    ) -> remote::Result<Event> {
        Ok(CalendarClient::insert_event(self, calendar_id, event, options).await?)
    }

    async fn patch_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        patch: &EventPatch,
    ) -> remote::Result<Event> {
        Ok(CalendarClient::patch_event(self, calendar_id, event_id, patch).await?)
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> remote::Result<()> {
        Ok(CalendarClient::delete_event(self, calendar_id, event_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instances_page_without_items() {
        let page: InstancesPage =
            serde_json::from_str(r#"{"kind": "calendar#events", "summary": "Work"}"#).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_instances_page_items() {
        let json = r#"{
            "items": [{
                "id": "E1_20240304T090000Z",
                "recurringEventId": "E1",
                "originalStartTime": {"dateTime": "2024-03-04T09:00:00Z"}
            }]
        }"#;
        let page: InstancesPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.items[0]
            .original_start_time
            .as_ref()
            .unwrap()
            .matches("2024-03-04T09:00:00Z"));
    }
}
