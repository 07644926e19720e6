use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::event::{EventError, Result};
use crate::remote::EventsApi;

/// Which part of a recurring series a mutation applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// One occurrence.
    Single,
    /// One occurrence and every later one.
    Future,
    /// The whole series, or the event itself if it does not repeat.
    #[default]
    All,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Single => "single",
            Scope::Future => "future",
            Scope::All => "all",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = EventError;

    /// Parses a scope name. Blank input means [`Scope::All`].
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Scope::All),
            "single" => Ok(Scope::Single),
            "future" => Ok(Scope::Future),
            other => Err(EventError::validation(format!(
                "invalid scope: {other:?} (must be single, future, or all)"
            ))),
        }
    }
}

/// A validated scope together with the instance it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventScope {
    All,
    Single { original_start: String },
    Future { original_start: String },
}

impl EventScope {
    /// Combines a scope with the `--original-start` value.
    ///
    /// `single` and `future` need an original start that is either a date
    /// (`YYYY-MM-DD`, all-day series) or an RFC 3339 timestamp. For `all`
    /// the original start is ignored.
    pub fn new(scope: Scope, original_start: Option<&str>) -> Result<Self> {
        if scope == Scope::All {
            return Ok(EventScope::All);
        }

        let original_start = original_start
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                EventError::validation(format!("--original-start required when --scope={scope}"))
            })?;

        let parses = NaiveDate::parse_from_str(original_start, "%Y-%m-%d").is_ok()
            || DateTime::parse_from_rfc3339(original_start).is_ok();
        if !parses {
            return Err(EventError::validation(format!(
                "invalid --original-start {original_start:?} (use YYYY-MM-DD or RFC3339)"
            )));
        }

        let original_start = original_start.to_string();
        Ok(if scope == Scope::Single {
            EventScope::Single { original_start }
        } else {
            EventScope::Future { original_start }
        })
    }

    pub fn scope(&self) -> Scope {
        match self {
            EventScope::All => Scope::All,
            EventScope::Single { .. } => Scope::Single,
            EventScope::Future { .. } => Scope::Future,
        }
    }

    pub fn original_start(&self) -> Option<&str> {
        match self {
            EventScope::All => None,
            EventScope::Single { original_start } | EventScope::Future { original_start } => {
                Some(original_start)
            }
        }
    }
}

/// The resource a scoped mutation must be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeTarget {
    pub target_id: String,
    /// The series master's rules before any change; only for `future`.
    pub parent_recurrence: Option<Vec<String>>,
}

/// Resolves the event ID a scoped mutation applies to.
///
/// Only reads from the remote service, so it is safe to repeat. `all`
/// issues no request at all.
pub async fn resolve_scope<A>(
    api: &A,
    calendar_id: &str,
    series_id: &str,
    scope: &EventScope,
) -> Result<ScopeTarget>
where
    A: EventsApi + ?Sized,
{
    match scope {
        EventScope::All => Ok(ScopeTarget {
            target_id: series_id.to_string(),
            parent_recurrence: None,
        }),
        EventScope::Single { original_start } => {
            let target_id =
                resolve_instance_id(api, calendar_id, series_id, original_start).await?;
            Ok(ScopeTarget {
                target_id,
                parent_recurrence: None,
            })
        }
        EventScope::Future { original_start } => {
            let parent = api.get_event(calendar_id, series_id).await?;
            if !parent.is_recurring() {
                return Err(EventError::validation(format!(
                    "event {series_id} is not a recurring event"
                )));
            }
            let target_id =
                resolve_instance_id(api, calendar_id, series_id, original_start).await?;
            Ok(ScopeTarget {
                target_id,
                parent_recurrence: Some(parent.recurrence),
            })
        }
    }
}

/// Finds the ID of the instance of `series_id` generated for
/// `original_start`.
///
/// The instance ID format belongs to the service, so it is looked up
/// rather than derived from the series ID.
pub async fn resolve_instance_id<A>(
    api: &A,
    calendar_id: &str,
    series_id: &str,
    original_start: &str,
) -> Result<String>
where
    A: EventsApi + ?Sized,
{
    let instances = api
        .list_instances(calendar_id, series_id, Some(original_start))
        .await?;

    instances
        .into_iter()
        .filter(|instance| {
            instance
                .original_start_time
                .as_ref()
                .is_some_and(|start| start.matches(original_start))
        })
        .find_map(|instance| instance.id)
        .ok_or_else(|| {
            EventError::not_found(format!(
                "no instance of event {series_id} starts at {original_start}"
            ))
        })
}
