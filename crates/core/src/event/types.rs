use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// An event resource as stored by the remote calendar service.
///
/// Only the attributes this client reads or writes are modelled; unknown
/// fields in responses are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    /// Set on instances: the series master this occurrence belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_event_id: Option<String>,
    /// Set on instances: the start time the recurrence rule generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_start_time: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recurrence: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<Attendee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Reminders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests_can_invite_others: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests_can_modify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests_can_see_other_guests: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_properties: Option<ExtendedProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_data: Option<ConferenceData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EventSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hangout_link: Option<String>,
}

impl Event {
    /// Creates an event with a summary and a time range.
    pub fn new(summary: impl Into<String>, start: EventDateTime, end: EventDateTime) -> Self {
        Self {
            summary: Some(summary.into()),
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Sets a specific ID for this event (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the recurrence rule lines.
    pub fn with_recurrence<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recurrence = rules.into_iter().map(Into::into).collect();
        self
    }

    /// Marks this event as an instance of a recurring series.
    pub fn as_instance_of(
        mut self,
        series_id: impl Into<String>,
        original_start: EventDateTime,
    ) -> Self {
        self.recurring_event_id = Some(series_id.into());
        self.original_start_time = Some(original_start);
        self
    }

    /// Returns true if this event is the master of a recurring series.
    pub fn is_recurring(&self) -> bool {
        !self.recurrence.is_empty()
    }

    /// Returns true if the event spans whole days.
    pub fn is_all_day(&self) -> bool {
        self.start.as_ref().is_some_and(EventDateTime::is_all_day)
    }
}

/// Start or end of an event: either a whole day or a precise instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// `YYYY-MM-DD`, set for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// RFC 3339 timestamp, set for timed events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    /// An all-day value.
    pub fn date(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    /// A timed value.
    pub fn date_time(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            ..Self::default()
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.date.is_some() && self.date_time.is_none()
    }

    /// The raw value, whichever of `date`/`dateTime` is set.
    pub fn value(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }

    /// Compares against a user-supplied timestamp.
    ///
    /// Timed values match when they denote the same instant, whatever the
    /// offset each side is written in. Date values match on the calendar
    /// date.
    pub fn matches(&self, raw: &str) -> bool {
        let raw = raw.trim();
        if let Some(date_time) = &self.date_time {
            return match (
                DateTime::parse_from_rfc3339(date_time),
                DateTime::parse_from_rfc3339(raw),
            ) {
                (Ok(left), Ok(right)) => left == right,
                _ => date_time == raw,
            };
        }
        if let Some(date) = &self.date {
            return match (
                NaiveDate::parse_from_str(date, "%Y-%m-%d"),
                NaiveDate::parse_from_str(raw, "%Y-%m-%d"),
            ) {
                (Ok(left), Ok(right)) => left == right,
                _ => date == raw,
            };
        }
        false
    }
}

/// A guest of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<bool>,
}

impl Attendee {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }
}

/// Reminder configuration of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<ReminderOverride>,
}

impl Reminders {
    /// Falls back to the calendar's default reminders.
    pub fn calendar_default() -> Self {
        Self {
            use_default: true,
            overrides: Vec::new(),
        }
    }

    /// Uses the given reminders instead of the calendar defaults.
    pub fn custom(overrides: Vec<ReminderOverride>) -> Self {
        Self {
            use_default: false,
            overrides,
        }
    }
}

/// A single custom reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderOverride {
    /// `popup` or `email`.
    pub method: String,
    pub minutes: u32,
}

/// Key/value metadata attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedProperties {
    /// Visible only on the organizer's copy of the event.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub private: BTreeMap<String, String>,
    /// Visible on every attendee's copy.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shared: BTreeMap<String, String>,
}

impl ExtendedProperties {
    pub fn is_empty(&self) -> bool {
        self.private.is_empty() && self.shared.is_empty()
    }
}

/// Video conferencing attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_request: Option<CreateConferenceRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry_points: Vec<EntryPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConferenceRequest {
    pub request_id: String,
    pub conference_solution_key: ConferenceSolutionKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceSolutionKey {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    #[serde(default)]
    pub entry_point_type: String,
    #[serde(default)]
    pub uri: String,
}

/// A file linked to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Where an event was created or imported from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSource {
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_camel_case() {
        let event = Event::new(
            "Planning",
            EventDateTime::date_time("2024-03-04T09:00:00Z"),
            EventDateTime::date_time("2024-03-04T10:00:00Z"),
        )
        .with_recurrence(["RRULE:FREQ=WEEKLY;BYDAY=MO"]);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["start"]["dateTime"], "2024-03-04T09:00:00Z");
        assert_eq!(json["recurrence"][0], "RRULE:FREQ=WEEKLY;BYDAY=MO");
        assert!(json.get("attendees").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_event_deserializes_unknown_fields() {
        let json = r#"{
            "kind": "calendar#event",
            "id": "abc_20240304T090000Z",
            "recurringEventId": "abc",
            "originalStartTime": {"dateTime": "2024-03-04T10:00:00+01:00"},
            "etag": "\"3400\""
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.recurring_event_id.as_deref(), Some("abc"));
        assert!(event.recurrence.is_empty());
    }

    #[test]
    fn test_date_time_matches_same_instant() {
        let value = EventDateTime::date_time("2024-03-04T10:00:00+01:00");
        assert!(value.matches("2024-03-04T09:00:00Z"));
        assert!(!value.matches("2024-03-04T10:00:00Z"));
    }

    #[test]
    fn test_date_matches_calendar_date() {
        let value = EventDateTime::date("2024-06-01");
        assert!(value.matches("2024-06-01"));
        assert!(value.matches(" 2024-06-01 "));
        assert!(!value.matches("2024-06-02"));
        assert!(!value.matches("2024-06-01T00:00:00Z"));
    }

    #[test]
    fn test_is_all_day() {
        let all_day = Event::new(
            "Holiday",
            EventDateTime::date("2024-06-01"),
            EventDateTime::date("2024-06-02"),
        );
        assert!(all_day.is_all_day());
        assert!(!all_day.is_recurring());
    }
}
