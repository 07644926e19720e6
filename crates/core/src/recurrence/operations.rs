//! Scoped update and delete of (possibly recurring) events.
//!
//! Each operation is a short, strictly sequential series of remote calls.
//! For `future` the instance and the series master are changed by two
//! separate requests; if the second fails the first is not rolled back and
//! the failure is reported as [`EventError::ParentTruncation`].

use serde::Serialize;

use crate::event::{merge_attendees, Event, EventError, EventPatch, Field, Result};
use crate::remote::EventsApi;

use super::scope::{resolve_scope, EventScope};
use super::truncate::truncate_recurrence;

/// Result of a scoped delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub calendar_id: String,
    /// The resource that was deleted (series or instance ID).
    pub event_id: String,
    /// New rules of the series master, when a `future` delete truncated it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated_recurrence: Option<Vec<String>>,
}

/// Applies `patch` to the part of the event selected by `scope`.
///
/// With `future`, the split-off instance keeps repeating with the master's
/// rules unless the patch sets or clears the recurrence itself, and the
/// master is then cut off before the instance.
pub async fn update_event<A>(
    api: &A,
    calendar_id: &str,
    event_id: &str,
    scope: &EventScope,
    mut patch: EventPatch,
) -> Result<Event>
where
    A: EventsApi + ?Sized,
{
    if patch.is_empty() {
        return Err(EventError::validation("no updates provided"));
    }

    let target = resolve_scope(api, calendar_id, event_id, scope).await?;
    let truncated = truncation_for(scope, target.parent_recurrence.as_deref())?;

    if let Some(parent_recurrence) = target.parent_recurrence {
        if patch.recurrence.is_unset() {
            patch.recurrence = Field::Set(parent_recurrence);
        }
    }

    let updated = api
        .patch_event(calendar_id, &target.target_id, &patch)
        .await?;

    if let Some(truncated) = truncated {
        truncate_parent(api, calendar_id, event_id, &target.target_id, truncated).await?;
    }
    Ok(updated)
}

/// Deletes the part of the event selected by `scope`.
pub async fn delete_event<A>(
    api: &A,
    calendar_id: &str,
    event_id: &str,
    scope: &EventScope,
) -> Result<DeleteOutcome>
where
    A: EventsApi + ?Sized,
{
    let target = resolve_scope(api, calendar_id, event_id, scope).await?;
    let truncated = truncation_for(scope, target.parent_recurrence.as_deref())?;

    api.delete_event(calendar_id, &target.target_id).await?;

    if let Some(truncated) = &truncated {
        truncate_parent(api, calendar_id, event_id, &target.target_id, truncated.clone()).await?;
    }
    Ok(DeleteOutcome {
        calendar_id: calendar_id.to_string(),
        event_id: target.target_id,
        truncated_recurrence: truncated,
    })
}

/// Adds attendees to the patch while keeping the event's current guests.
pub async fn add_attendees<A>(
    api: &A,
    calendar_id: &str,
    event_id: &str,
    emails: &str,
    patch: &mut EventPatch,
) -> Result<()>
where
    A: EventsApi + ?Sized,
{
    if emails.trim().is_empty() {
        return Err(EventError::validation("empty --add-attendee"));
    }
    let existing = api.get_event(calendar_id, event_id).await?;
    patch.attendees = Field::Set(merge_attendees(&existing.attendees, emails));
    Ok(())
}

/// Computes the master's truncated rules up front, so an unusable rule set
/// is rejected before anything is changed.
fn truncation_for(scope: &EventScope, parent: Option<&[String]>) -> Result<Option<Vec<String>>> {
    match (scope, parent) {
        (EventScope::Future { original_start }, Some(rules)) => {
            truncate_recurrence(rules, original_start).map(Some)
        }
        _ => Ok(None),
    }
}

async fn truncate_parent<A>(
    api: &A,
    calendar_id: &str,
    series_id: &str,
    instance_id: &str,
    truncated: Vec<String>,
) -> Result<()>
where
    A: EventsApi + ?Sized,
{
    api.patch_event(calendar_id, series_id, &EventPatch::recurrence(truncated))
        .await
        .map(|_| ())
        .map_err(|source| EventError::ParentTruncation {
            series_id: series_id.to_string(),
            instance_id: instance_id.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Attendee, EventDateTime};
    use crate::recurrence::Scope;
    use crate::remote::{InMemoryEventsApi, RemoteCall, RemoteError};

    const CAL: &str = "primary";
    const WEEKLY: &str = "RRULE:FREQ=WEEKLY;BYDAY=MO";
    const INSTANCE: &str = "E1_20240304T090000Z";

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    async fn weekly_series() -> InMemoryEventsApi {
        let api = InMemoryEventsApi::new();
        api.seed(
            CAL,
            Event::new(
                "Planning",
                EventDateTime::date_time("2024-02-26T09:00:00Z"),
                EventDateTime::date_time("2024-02-26T10:00:00Z"),
            )
            .with_id("E1")
            .with_recurrence([WEEKLY]),
        )
        .await;
        api.seed(
            CAL,
            Event::new(
                "Planning",
                EventDateTime::date_time("2024-03-04T09:00:00Z"),
                EventDateTime::date_time("2024-03-04T10:00:00Z"),
            )
            .with_id(INSTANCE)
            .as_instance_of("E1", EventDateTime::date_time("2024-03-04T09:00:00Z")),
        )
        .await;
        api
    }

    fn future() -> EventScope {
        EventScope::new(Scope::Future, Some("2024-03-04T09:00:00Z")).unwrap()
    }

    fn rename(summary: &str) -> EventPatch {
        EventPatch {
            summary: Field::Set(summary.to_string()),
            ..EventPatch::default()
        }
    }

    #[tokio::test]
    async fn test_update_all_patches_series() {
        let api = weekly_series().await;

        let updated = update_event(&api, CAL, "E1", &EventScope::All, rename("Retro"))
            .await
            .unwrap();

        assert_eq!(updated.id.as_deref(), Some("E1"));
        assert_eq!(updated.summary.as_deref(), Some("Retro"));
        assert_eq!(
            api.calls().await,
            vec![RemoteCall::Patch {
                event_id: "E1".to_string(),
                patch: rename("Retro"),
            }]
        );
    }

    #[tokio::test]
    async fn test_update_single_leaves_series_untouched() {
        let api = weekly_series().await;
        let scope = EventScope::new(Scope::Single, Some("2024-03-04T09:00:00Z")).unwrap();

        update_event(&api, CAL, "E1", &scope, rename("Moved planning"))
            .await
            .unwrap();

        let master = api.stored(CAL, "E1").await.unwrap();
        assert_eq!(master.summary.as_deref(), Some("Planning"));
        assert_eq!(master.recurrence, strings(&[WEEKLY]));
        let instance = api.stored(CAL, INSTANCE).await.unwrap();
        assert_eq!(instance.summary.as_deref(), Some("Moved planning"));
    }

    #[tokio::test]
    async fn test_update_future_splits_series() {
        let api = weekly_series().await;

        update_event(&api, CAL, "E1", &future(), rename("Planning v2"))
            .await
            .unwrap();

        let calls = api.calls().await;
        assert_eq!(calls.len(), 4);
        assert_eq!(
            calls[2],
            RemoteCall::Patch {
                event_id: INSTANCE.to_string(),
                patch: EventPatch {
                    recurrence: Field::Set(strings(&[WEEKLY])),
                    ..rename("Planning v2")
                },
            }
        );
        assert_eq!(
            calls[3],
            RemoteCall::Patch {
                event_id: "E1".to_string(),
                patch: EventPatch::recurrence(strings(&[
                    "RRULE:FREQ=WEEKLY;BYDAY=MO;UNTIL=20240303T235959Z"
                ])),
            }
        );
    }

    #[tokio::test]
    async fn test_update_future_keeps_explicit_recurrence() {
        let api = weekly_series().await;
        let patch = EventPatch {
            recurrence: Field::Set(strings(&["RRULE:FREQ=DAILY"])),
            ..EventPatch::default()
        };

        update_event(&api, CAL, "E1", &future(), patch).await.unwrap();

        let instance = api.stored(CAL, INSTANCE).await.unwrap();
        assert_eq!(instance.recurrence, strings(&["RRULE:FREQ=DAILY"]));
        // The master is still truncated from its own original rules.
        let master = api.stored(CAL, "E1").await.unwrap();
        assert_eq!(
            master.recurrence,
            strings(&["RRULE:FREQ=WEEKLY;BYDAY=MO;UNTIL=20240303T235959Z"])
        );
    }

    #[tokio::test]
    async fn test_update_future_keeps_explicit_clear() {
        let api = weekly_series().await;
        let patch = EventPatch {
            recurrence: Field::Cleared,
            ..EventPatch::default()
        };

        update_event(&api, CAL, "E1", &future(), patch).await.unwrap();

        let instance = api.stored(CAL, INSTANCE).await.unwrap();
        assert!(instance.recurrence.is_empty());
    }

    #[tokio::test]
    async fn test_update_empty_patch_is_rejected() {
        let api = weekly_series().await;

        let result = update_event(&api, CAL, "E1", &EventScope::All, EventPatch::new()).await;

        assert_eq!(result, Err(EventError::validation("no updates provided")));
        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_future_parent_failure_is_reported() {
        let api = weekly_series().await;
        let failure = RemoteError::Api {
            status: 500,
            message: "Backend Error".to_string(),
        };
        api.fail_patch("E1", failure.clone()).await;

        let result = update_event(&api, CAL, "E1", &future(), rename("Planning v2")).await;

        assert_eq!(
            result,
            Err(EventError::ParentTruncation {
                series_id: "E1".to_string(),
                instance_id: INSTANCE.to_string(),
                source: failure,
            })
        );
        // The instance change already went through.
        let instance = api.stored(CAL, INSTANCE).await.unwrap();
        assert_eq!(instance.summary.as_deref(), Some("Planning v2"));
    }

    #[tokio::test]
    async fn test_update_future_ambiguous_rules_change_nothing() {
        let api = InMemoryEventsApi::new();
        api.seed(
            CAL,
            Event::default()
                .with_id("E1")
                .with_recurrence(["RRULE:FREQ=DAILY", "RRULE:FREQ=WEEKLY"]),
        )
        .await;
        api.seed(
            CAL,
            Event::default()
                .with_id(INSTANCE)
                .as_instance_of("E1", EventDateTime::date_time("2024-03-04T09:00:00Z")),
        )
        .await;

        let result = update_event(&api, CAL, "E1", &future(), rename("x")).await;

        assert!(matches!(result, Err(EventError::Validation(_))));
        assert!(!api
            .calls()
            .await
            .iter()
            .any(|call| matches!(call, RemoteCall::Patch { .. })));
    }

    #[tokio::test]
    async fn test_delete_all() {
        let api = weekly_series().await;

        let outcome = delete_event(&api, CAL, "E1", &EventScope::All).await.unwrap();

        assert_eq!(outcome.event_id, "E1");
        assert_eq!(outcome.truncated_recurrence, None);
        assert!(api.stored(CAL, "E1").await.is_none());
    }

    #[tokio::test]
    async fn test_delete_single() {
        let api = weekly_series().await;
        let scope = EventScope::new(Scope::Single, Some("2024-03-04T09:00:00Z")).unwrap();

        let outcome = delete_event(&api, CAL, "E1", &scope).await.unwrap();

        assert_eq!(outcome.event_id, INSTANCE);
        assert!(api.stored(CAL, INSTANCE).await.is_none());
        assert_eq!(
            api.stored(CAL, "E1").await.unwrap().recurrence,
            strings(&[WEEKLY])
        );
    }

    #[tokio::test]
    async fn test_delete_future_truncates_series() {
        let api = weekly_series().await;

        let outcome = delete_event(&api, CAL, "E1", &future()).await.unwrap();

        let until = strings(&["RRULE:FREQ=WEEKLY;BYDAY=MO;UNTIL=20240303T235959Z"]);
        assert_eq!(outcome.event_id, INSTANCE);
        assert_eq!(outcome.truncated_recurrence, Some(until.clone()));
        assert_eq!(
            api.calls().await,
            vec![
                RemoteCall::Get {
                    event_id: "E1".to_string()
                },
                RemoteCall::ListInstances {
                    event_id: "E1".to_string(),
                    original_start: Some("2024-03-04T09:00:00Z".to_string()),
                },
                RemoteCall::Delete {
                    event_id: INSTANCE.to_string()
                },
                RemoteCall::Patch {
                    event_id: "E1".to_string(),
                    patch: EventPatch::recurrence(until.clone()),
                },
            ]
        );
        assert_eq!(api.stored(CAL, "E1").await.unwrap().recurrence, until);
    }

    #[test]
    fn test_delete_outcome_json() {
        let outcome = DeleteOutcome {
            calendar_id: CAL.to_string(),
            event_id: "E1".to_string(),
            truncated_recurrence: None,
        };
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"calendarId":"primary","eventId":"E1"}"#
        );
    }

    #[tokio::test]
    async fn test_add_attendees_merges_existing() {
        let api = weekly_series().await;
        let mut master = api.stored(CAL, "E1").await.unwrap();
        master.attendees = vec![Attendee {
            email: "ann@example.com".to_string(),
            response_status: Some("accepted".to_string()),
            ..Attendee::default()
        }];
        api.seed(CAL, master).await;

        let mut patch = EventPatch::new();
        add_attendees(&api, CAL, "E1", "bob@example.com, ann@example.com", &mut patch)
            .await
            .unwrap();

        let attendees = patch.attendees.as_set().unwrap();
        assert_eq!(attendees.len(), 2);
        assert_eq!(attendees[0].response_status.as_deref(), Some("accepted"));
        assert_eq!(attendees[1].email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_add_attendees_rejects_empty() {
        let api = weekly_series().await;
        let mut patch = EventPatch::new();

        let result = add_attendees(&api, CAL, "E1", " ", &mut patch).await;

        assert_eq!(result, Err(EventError::validation("empty --add-attendee")));
        assert!(api.calls().await.is_empty());
    }
}
