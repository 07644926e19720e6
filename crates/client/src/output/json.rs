//! JSON output formatting.

use calctl_core::event::Event;
use calctl_core::recurrence::DeleteOutcome;
use serde::Serialize;

#[derive(Serialize)]
struct EventOutput<'a> {
    event: &'a Event,
}

#[derive(Serialize)]
struct DeletedOutput<'a> {
    deleted: bool,
    #[serde(flatten)]
    outcome: &'a DeleteOutcome,
}

/// Format a value as JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// `{"event": ...}`
pub fn format_event(event: &Event) -> String {
    format_json(&EventOutput { event })
}

/// `{"deleted": true, "calendarId": ..., "eventId": ...}`
pub fn format_deleted(outcome: &DeleteOutcome) -> String {
    format_json(&DeletedOutput {
        deleted: true,
        outcome,
    })
}
