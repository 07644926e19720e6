//! Builders turning command-line style input into event attributes.

use std::collections::BTreeMap;

use uuid::Uuid;

use super::error::{EventError, Result};
use super::types::{
    Attachment, Attendee, ConferenceData, ConferenceSolutionKey, CreateConferenceRequest,
    EventDateTime, EventSource, ExtendedProperties,
};

/// Conference solution used for generated video meetings.
const MEET_SOLUTION: &str = "hangoutsMeet";

/// Builds a start/end value: a bare date for all-day events, a timestamp
/// otherwise.
pub fn build_event_date_time(value: &str, all_day: bool) -> EventDateTime {
    let value = value.trim();
    if all_day {
        EventDateTime::date(value)
    } else {
        EventDateTime::date_time(value)
    }
}

/// Splits a comma-separated email list into attendees.
pub fn build_attendees(emails: &str) -> Vec<Attendee> {
    split_emails(emails).map(Attendee::new).collect()
}

/// Adds new addresses to an existing attendee list.
///
/// Existing attendees keep their response status and other metadata.
/// Addresses already present (case-insensitive) are not added twice.
pub fn merge_attendees(existing: &[Attendee], emails: &str) -> Vec<Attendee> {
    let mut merged = existing.to_vec();
    for email in split_emails(emails) {
        let known = merged
            .iter()
            .any(|attendee| attendee.email.eq_ignore_ascii_case(email));
        if !known {
            merged.push(Attendee::new(email));
        }
    }
    merged
}

fn split_emails(emails: &str) -> impl Iterator<Item = &str> {
    emails
        .split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
}

/// Cleans up recurrence lines, dropping blanks. Empty means no recurrence.
pub fn build_recurrence(rules: &[String]) -> Vec<String> {
    rules
        .iter()
        .map(|rule| rule.trim())
        .filter(|rule| !rule.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds extended properties from `key=value` pairs.
///
/// Returns `None` when both lists are empty.
pub fn build_extended_properties(
    private: &[String],
    shared: &[String],
) -> Result<Option<ExtendedProperties>> {
    let properties = ExtendedProperties {
        private: parse_properties(private)?,
        shared: parse_properties(shared)?,
    };
    if properties.is_empty() {
        return Ok(None);
    }
    Ok(Some(properties))
}

fn parse_properties(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut properties = BTreeMap::new();
    for pair in pairs.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            EventError::validation(format!("invalid property {pair:?} (expected key=value)"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(EventError::validation(format!(
                "invalid property {pair:?} (empty key)"
            )));
        }
        properties.insert(key.to_string(), value.trim().to_string());
    }
    Ok(properties)
}

/// Requests a new video meeting for the event.
///
/// The request id only has to be unique per event, so a random UUID does.
pub fn build_conference_data() -> ConferenceData {
    ConferenceData {
        create_request: Some(CreateConferenceRequest {
            request_id: Uuid::new_v4().to_string(),
            conference_solution_key: ConferenceSolutionKey {
                kind: MEET_SOLUTION.to_string(),
            },
        }),
        ..ConferenceData::default()
    }
}

/// Links files by URL.
pub fn build_attachments(urls: &[String]) -> Vec<Attachment> {
    urls.iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(|url| Attachment {
            file_url: url.to_string(),
            title: None,
        })
        .collect()
}

/// Builds the event source when a URL is given.
pub fn build_source(url: &str, title: &str) -> Option<EventSource> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    Some(EventSource {
        url: url.to_string(),
        title: title.trim().to_string(),
    })
}
