//! Pretty output formatting.

use calctl_core::event::{Event, EventDateTime};
use calctl_core::recurrence::DeleteOutcome;

/// Format an event for display.
pub fn format_event(event: &Event) -> String {
    let title = event.summary.as_deref().unwrap_or("(no title)");
    let mut output = title.to_string();
    if let Some(id) = &event.id {
        output.push_str(&format!("\n  ID: {}", id));
    }
    if let Some(start) = &event.start {
        output.push_str(&format!("\n  Start: {}", format_time(start)));
    }
    if let Some(end) = &event.end {
        output.push_str(&format!("\n  End: {}", format_time(end)));
    }
    if let Some(location) = &event.location {
        output.push_str(&format!("\n  Location: {}", location));
    }
    if let Some(description) = &event.description {
        output.push_str(&format!("\n  Description: {}", description));
    }
    for rule in &event.recurrence {
        output.push_str(&format!("\n  Recurrence: {}", rule));
    }
    if let Some(series) = &event.recurring_event_id {
        output.push_str(&format!("\n  Series: {}", series));
    }
    if !event.attendees.is_empty() {
        let emails: Vec<&str> = event.attendees.iter().map(|a| a.email.as_str()).collect();
        output.push_str(&format!("\n  Attendees: {}", emails.join(", ")));
    }
    if let Some(link) = &event.hangout_link {
        output.push_str(&format!("\n  Meet: {}", link));
    }
    if let Some(link) = &event.html_link {
        output.push_str(&format!("\n  Link: {}", link));
    }
    output
}

/// Format the result of a delete for display.
pub fn format_deleted(outcome: &DeleteOutcome) -> String {
    let mut output = format!(
        "Deleted event {} from calendar {}",
        outcome.event_id, outcome.calendar_id
    );
    if let Some(rules) = &outcome.truncated_recurrence {
        output.push_str("\n  Series now ends:");
        for rule in rules {
            output.push_str(&format!("\n    {}", rule));
        }
    }
    output
}

fn format_time(time: &EventDateTime) -> String {
    let value = time.value().unwrap_or("-");
    if time.is_all_day() {
        return format!("{} (all day)", value);
    }
    match &time.time_zone {
        Some(zone) => format!("{} ({})", value, zone),
        None => value.to_string(),
    }
}
