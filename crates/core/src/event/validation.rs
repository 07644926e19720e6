//! Validation of user-supplied event attributes.

use chrono::{DateTime, NaiveDate};

use super::error::{EventError, Result};
use super::types::ReminderOverride;

/// Highest event color id the calendar palette defines.
const MAX_COLOR_ID: u8 = 11;

/// Reminders cannot fire more than four weeks ahead.
const MAX_REMINDER_MINUTES: u32 = 40_320;

/// Maximum number of custom reminders per event.
pub const MAX_REMINDERS: usize = 5;

/// Validates an event color id (`1`-`11`). Blank input clears the color.
pub fn validate_color_id(value: &str) -> Result<Option<String>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<u8>() {
        Ok(id) if (1..=MAX_COLOR_ID).contains(&id) => Ok(Some(id.to_string())),
        _ => Err(EventError::validation(format!(
            "invalid event color: {value:?} (must be 1-{MAX_COLOR_ID})"
        ))),
    }
}

/// Validates an event visibility. Blank input means the calendar default.
pub fn validate_visibility(value: &str) -> Result<Option<String>> {
    let value = value.trim().to_lowercase();
    match value.as_str() {
        "" => Ok(None),
        "default" | "public" | "private" | "confidential" => Ok(Some(value)),
        _ => Err(EventError::validation(format!(
            "invalid visibility: {value:?} (must be default, public, private, or confidential)"
        ))),
    }
}

/// Validates a transparency, accepting `busy`/`free` as aliases.
pub fn validate_transparency(value: &str) -> Result<Option<String>> {
    let value = value.trim().to_lowercase();
    match value.as_str() {
        "" => Ok(None),
        "opaque" | "busy" => Ok(Some("opaque".to_string())),
        "transparent" | "free" => Ok(Some("transparent".to_string())),
        _ => Err(EventError::validation(format!(
            "invalid transparency: {value:?} (must be opaque/busy or transparent/free)"
        ))),
    }
}

/// Validates a guest notification mode and returns its canonical spelling.
pub fn validate_send_updates(value: &str) -> Result<Option<String>> {
    let value = value.trim();
    match value.to_lowercase().as_str() {
        "" => Ok(None),
        "all" => Ok(Some("all".to_string())),
        "externalonly" => Ok(Some("externalOnly".to_string())),
        "none" => Ok(Some("none".to_string())),
        _ => Err(EventError::validation(format!(
            "invalid send-updates value: {value:?} (must be all, externalOnly, or none)"
        ))),
    }
}

/// Parses `method:duration` reminder specs.
///
/// Blank entries are skipped. Returns `None` when nothing is left, which
/// callers treat as "use the calendar defaults".
pub fn parse_reminders(specs: &[String]) -> Result<Option<Vec<ReminderOverride>>> {
    let overrides = specs
        .iter()
        .map(|spec| spec.trim())
        .filter(|spec| !spec.is_empty())
        .map(parse_reminder)
        .collect::<Result<Vec<_>>>()?;

    if overrides.len() > MAX_REMINDERS {
        return Err(EventError::validation(format!(
            "too many reminders: {} (max {MAX_REMINDERS})",
            overrides.len()
        )));
    }
    if overrides.is_empty() {
        return Ok(None);
    }
    Ok(Some(overrides))
}

/// Parses one `method:duration` reminder, e.g. `popup:30m` or `email:1d`.
pub fn parse_reminder(spec: &str) -> Result<ReminderOverride> {
    let (method, duration) = spec.split_once(':').ok_or_else(|| {
        EventError::validation(format!(
            "invalid reminder {spec:?} (expected method:duration, e.g. popup:30m)"
        ))
    })?;

    let method = method.trim().to_lowercase();
    if method != "popup" && method != "email" {
        return Err(EventError::validation(format!(
            "invalid reminder method {method:?} (must be popup or email)"
        )));
    }

    let minutes = parse_reminder_minutes(duration.trim())?;
    Ok(ReminderOverride { method, minutes })
}

/// Parses a reminder lead time: bare minutes, or a number with `m`, `h`,
/// `d` or `w`.
fn parse_reminder_minutes(duration: &str) -> Result<u32> {
    let invalid = || {
        EventError::validation(format!(
            "invalid reminder duration {duration:?} (e.g. 30, 30m, 2h, 1d, 1w)"
        ))
    };

    let (digits, multiplier) = match duration.char_indices().last() {
        Some((idx, 'm')) => (&duration[..idx], 1),
        Some((idx, 'h')) => (&duration[..idx], 60),
        Some((idx, 'd')) => (&duration[..idx], 60 * 24),
        Some((idx, 'w')) => (&duration[..idx], 60 * 24 * 7),
        Some(_) => (duration, 1),
        None => return Err(invalid()),
    };

    let minutes = digits
        .parse::<u32>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(invalid)?;

    if minutes > MAX_REMINDER_MINUTES {
        return Err(EventError::validation(format!(
            "reminder duration {duration:?} exceeds four weeks"
        )));
    }
    Ok(minutes)
}

/// Checks that a start/end value fits the event kind.
pub fn validate_event_time(value: &str, all_day: bool) -> Result<()> {
    let value = value.trim();
    if all_day {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            EventError::validation(format!(
                "invalid date {value:?} (all-day events use YYYY-MM-DD)"
            ))
        })?;
    } else {
        DateTime::parse_from_rfc3339(value).map_err(|_| {
            EventError::validation(format!(
                "invalid time {value:?} (use RFC3339, e.g. 2024-03-04T09:00:00Z)"
            ))
        })?;
    }
    Ok(())
}
