//! In-memory events API for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::event::{Event, EventPatch};

use super::{EventsApi, InsertOptions, RemoteError, Result};

/// A call received by [`InMemoryEventsApi`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    Get {
        event_id: String,
    },
    ListInstances {
        event_id: String,
        original_start: Option<String>,
    },
    Insert {
        summary: Option<String>,
    },
    Patch {
        event_id: String,
        patch: EventPatch,
    },
    Delete {
        event_id: String,
    },
}

/// In-memory stand-in for the remote calendar service.
///
/// Events are keyed by `(calendar_id, event_id)`. Instances of a recurring
/// event are stored as ordinary events carrying `recurring_event_id`.
/// Every call is recorded so tests can assert the exact request sequence,
/// and patch failures can be injected per event ID.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventsApi {
    events: Arc<RwLock<HashMap<(String, String), Event>>>,
    calls: Arc<RwLock<Vec<RemoteCall>>>,
    patch_failures: Arc<RwLock<HashMap<String, RemoteError>>>,
    next_id: Arc<RwLock<u64>>,
}

impl InMemoryEventsApi {
    /// Creates a new empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an event as-is. The event must have an ID.
    pub async fn seed(&self, calendar_id: &str, event: Event) {
        let id = event.id.clone().unwrap_or_default();
        self.events
            .write()
            .await
            .insert((calendar_id.to_string(), id), event);
    }

    /// Makes every later patch of `event_id` fail with `error`.
    pub async fn fail_patch(&self, event_id: &str, error: RemoteError) {
        self.patch_failures
            .write()
            .await
            .insert(event_id.to_string(), error);
    }

    /// Returns the stored copy of an event.
    pub async fn stored(&self, calendar_id: &str, event_id: &str) -> Option<Event> {
        self.events
            .read()
            .await
            .get(&(calendar_id.to_string(), event_id.to_string()))
            .cloned()
    }

    /// Returns every call received so far.
    pub async fn calls(&self) -> Vec<RemoteCall> {
        self.calls.read().await.clone()
    }

    async fn record(&self, call: RemoteCall) {
        self.calls.write().await.push(call);
    }

    fn not_found(event_id: &str) -> RemoteError {
        RemoteError::NotFound {
            id: event_id.to_string(),
        }
    }
}

#[async_trait]
impl EventsApi for InMemoryEventsApi {
    async fn get_event(&self, calendar_id: &str, event_id: &str) -> Result<Event> {
        self.record(RemoteCall::Get {
            event_id: event_id.to_string(),
        })
        .await;
        self.stored(calendar_id, event_id)
            .await
            .ok_or_else(|| Self::not_found(event_id))
    }

    async fn list_instances(
        &self,
        calendar_id: &str,
        event_id: &str,
        original_start: Option<&str>,
    ) -> Result<Vec<Event>> {
        self.record(RemoteCall::ListInstances {
            event_id: event_id.to_string(),
            original_start: original_start.map(str::to_string),
        })
        .await;

        let events = self.events.read().await;
        if !events.contains_key(&(calendar_id.to_string(), event_id.to_string())) {
            return Err(Self::not_found(event_id));
        }
        let mut instances: Vec<Event> = events
            .iter()
            .filter(|((calendar, _), _)| calendar == calendar_id)
            .map(|(_, event)| event)
            .filter(|event| event.recurring_event_id.as_deref() == Some(event_id))
            .filter(|event| match (original_start, &event.original_start_time) {
                (None, _) => true,
                (Some(start), Some(original)) => original.matches(start),
                (Some(_), None) => false,
            })
            .cloned()
            .collect();
        instances.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(instances)
    }

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &Event,
        _options: &InsertOptions,
    ) -> Result<Event> {
        self.record(RemoteCall::Insert {
            summary: event.summary.clone(),
        })
        .await;

        let mut created = event.clone();
        if created.id.is_none() {
            let mut next_id = self.next_id.write().await;
            *next_id += 1;
            created.id = Some(format!("evt{:04}", *next_id));
        }
        self.seed(calendar_id, created.clone()).await;
        Ok(created)
    }

    async fn patch_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        patch: &EventPatch,
    ) -> Result<Event> {
        self.record(RemoteCall::Patch {
            event_id: event_id.to_string(),
            patch: patch.clone(),
        })
        .await;

        if let Some(error) = self.patch_failures.read().await.get(event_id) {
            return Err(error.clone());
        }

        let mut events = self.events.write().await;
        let event = events
            .get_mut(&(calendar_id.to_string(), event_id.to_string()))
            .ok_or_else(|| Self::not_found(event_id))?;
        patch.clone().apply_to(event);
        Ok(event.clone())
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()> {
        self.record(RemoteCall::Delete {
            event_id: event_id.to_string(),
        })
        .await;

        let mut events = self.events.write().await;
        events
            .remove(&(calendar_id.to_string(), event_id.to_string()))
            .ok_or_else(|| Self::not_found(event_id))?;
        // Deleting a series master deletes its instances too.
        events.retain(|(calendar, _), event| {
            calendar != calendar_id || event.recurring_event_id.as_deref() != Some(event_id)
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventDateTime, Field};

    const CAL: &str = "primary";

    fn weekly_master() -> Event {
        Event::new(
            "Planning",
            EventDateTime::date_time("2024-02-26T09:00:00Z"),
            EventDateTime::date_time("2024-02-26T10:00:00Z"),
        )
        .with_id("E1")
        .with_recurrence(["RRULE:FREQ=WEEKLY;BYDAY=MO"])
    }

    fn instance(id: &str, start: &str) -> Event {
        Event::new(
            "Planning",
            EventDateTime::date_time(start),
            EventDateTime::date_time(start),
        )
        .with_id(id)
        .as_instance_of("E1", EventDateTime::date_time(start))
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let api = InMemoryEventsApi::new();
        let event = Event::new(
            "Lunch",
            EventDateTime::date_time("2024-03-04T12:00:00Z"),
            EventDateTime::date_time("2024-03-04T13:00:00Z"),
        );

        let created = api
            .insert_event(CAL, &event, &InsertOptions::default())
            .await
            .unwrap();
        let id = created.id.clone().unwrap();

        assert_eq!(api.get_event(CAL, &id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let api = InMemoryEventsApi::new();
        let result = api.get_event(CAL, "missing").await;
        assert_eq!(
            result,
            Err(RemoteError::NotFound {
                id: "missing".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_list_instances_filters_by_original_start() {
        let api = InMemoryEventsApi::new();
        api.seed(CAL, weekly_master()).await;
        api.seed(CAL, instance("E1_a", "2024-02-26T09:00:00Z")).await;
        api.seed(CAL, instance("E1_b", "2024-03-04T09:00:00Z")).await;

        let all = api.list_instances(CAL, "E1", None).await.unwrap();
        assert_eq!(all.len(), 2);

        let one = api
            .list_instances(CAL, "E1", Some("2024-03-04T10:00:00+01:00"))
            .await
            .unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].id.as_deref(), Some("E1_b"));
    }

    #[tokio::test]
    async fn test_patch_applies_fields() {
        let api = InMemoryEventsApi::new();
        api.seed(CAL, weekly_master()).await;

        let patch = EventPatch {
            summary: Field::Set("Sprint planning".to_string()),
            ..EventPatch::default()
        };
        let updated = api.patch_event(CAL, "E1", &patch).await.unwrap();

        assert_eq!(updated.summary.as_deref(), Some("Sprint planning"));
        assert_eq!(updated.recurrence, ["RRULE:FREQ=WEEKLY;BYDAY=MO"]);
    }

    #[tokio::test]
    async fn test_injected_patch_failure() {
        let api = InMemoryEventsApi::new();
        api.seed(CAL, weekly_master()).await;
        let error = RemoteError::Api {
            status: 503,
            message: "Backend Error".to_string(),
        };
        api.fail_patch("E1", error.clone()).await;

        let result = api.patch_event(CAL, "E1", &EventPatch::new()).await;
        assert_eq!(result, Err(error));
    }

    #[tokio::test]
    async fn test_delete_master_removes_instances() {
        let api = InMemoryEventsApi::new();
        api.seed(CAL, weekly_master()).await;
        api.seed(CAL, instance("E1_a", "2024-02-26T09:00:00Z")).await;

        api.delete_event(CAL, "E1").await.unwrap();

        assert!(api.stored(CAL, "E1").await.is_none());
        assert!(api.stored(CAL, "E1_a").await.is_none());
        assert_eq!(
            api.calls().await,
            vec![RemoteCall::Delete {
                event_id: "E1".to_string()
            }]
        );
    }
}
