//! Event command handlers.
//!
//! Handlers take any [`EventsApi`], so they run the same against the HTTP
//! client and the in-memory fake.

use calctl_core::event::{Event, EventError};
use calctl_core::recurrence::{self, DeleteOutcome};
use calctl_core::remote::EventsApi;

use crate::cli::events::{CreateArgs, DeleteArgs, UpdateArgs};
use crate::confirm::ConfirmPolicy;
use crate::error::Result;

/// Fetch one event.
pub async fn get<A>(api: &A, calendar_id: &str, event_id: &str) -> Result<Event>
where
    A: EventsApi + ?Sized,
{
    let (calendar_id, event_id) = ids(calendar_id, event_id)?;
    Ok(api.get_event(calendar_id, event_id).await?)
}

/// Create an event.
pub async fn create<A>(api: &A, args: &CreateArgs) -> Result<Event>
where
    A: EventsApi + ?Sized,
{
    let calendar_id = required(&args.calendar_id, "empty calendarId")?;
    let (event, options) = args.to_event()?;

    let created = api.insert_event(calendar_id, &event, &options).await?;
    tracing::info!(calendar_id, event_id = ?created.id, "created event");
    Ok(created)
}

/// Update an event, or the part of a series selected by `--scope`.
pub async fn update<A>(api: &A, args: &UpdateArgs) -> Result<Event>
where
    A: EventsApi + ?Sized,
{
    let (calendar_id, event_id) = ids(&args.calendar_id, &args.event_id)?;
    let scope = args.event_scope()?;
    let mut patch = args.to_patch()?;
    if let Some(emails) = &args.add_attendee {
        recurrence::add_attendees(api, calendar_id, event_id, emails, &mut patch).await?;
    }

    let updated = recurrence::update_event(api, calendar_id, event_id, &scope, patch)
        .await
        .inspect_err(warn_partial)?;
    tracing::info!(calendar_id, event_id, scope = %scope.scope(), "updated event");
    Ok(updated)
}

/// Delete an event, or the part of a series selected by `--scope`, once
/// `policy` allows it.
pub async fn delete<A>(api: &A, args: &DeleteArgs, policy: ConfirmPolicy) -> Result<DeleteOutcome>
where
    A: EventsApi + ?Sized,
{
    let (calendar_id, event_id) = ids(&args.calendar_id, &args.event_id)?;
    let scope = args.event_scope()?;
    policy.confirm(&args.confirm_message(&scope))?;

    let outcome = recurrence::delete_event(api, calendar_id, event_id, &scope)
        .await
        .inspect_err(warn_partial)?;
    tracing::info!(
        calendar_id,
        event_id = %outcome.event_id,
        scope = %scope.scope(),
        "deleted event"
    );
    Ok(outcome)
}

fn warn_partial(error: &EventError) {
    if let EventError::ParentTruncation {
        series_id,
        instance_id,
        ..
    } = error
    {
        tracing::warn!(series_id, instance_id, "series left untruncated after split");
    }
}

fn ids<'a>(calendar_id: &'a str, event_id: &'a str) -> Result<(&'a str, &'a str)> {
    Ok((
        required(calendar_id, "empty calendarId")?,
        required(event_id, "empty eventId")?,
    ))
}

fn required<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EventError::validation(message).into());
    }
    Ok(value)
}
