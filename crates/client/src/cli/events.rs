//! Event CLI commands.

use calctl_core::event::{
    build_attachments, build_attendees, build_conference_data, build_event_date_time,
    build_extended_properties, build_recurrence, build_source, parse_reminders,
    validate_color_id, validate_event_time, validate_send_updates, validate_transparency,
    validate_visibility, Event, EventError, EventPatch, Field, Reminders, Result,
};
use calctl_core::recurrence::{EventScope, Scope};
use calctl_core::remote::InsertOptions;
use clap::{Args, Parser, Subcommand};

/// Event management commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// Available event actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// Get an event by ID.
    Get {
        /// Calendar ID.
        calendar_id: String,
        /// Event ID.
        event_id: String,
    },
    /// Create a new event.
    Create(CreateArgs),
    /// Update an event, an instance of it, or an instance and all later ones.
    Update(UpdateArgs),
    /// Delete an event, an instance of it, or an instance and all later ones.
    Delete(DeleteArgs),
}

/// Flags for `events create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Calendar ID.
    pub calendar_id: String,
    /// Event summary/title.
    #[arg(long)]
    pub summary: String,
    /// Start time (RFC3339, or YYYY-MM-DD with --all-day).
    #[arg(long)]
    pub from: String,
    /// End time (RFC3339, or YYYY-MM-DD with --all-day).
    #[arg(long)]
    pub to: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// Comma-separated attendee emails.
    #[arg(long)]
    pub attendees: Option<String>,
    /// All-day event (use date-only --from/--to).
    #[arg(long)]
    pub all_day: bool,
    /// Recurrence rule, e.g. 'RRULE:FREQ=MONTHLY;BYMONTHDAY=11'. Repeatable.
    #[arg(long = "rrule")]
    pub rrule: Vec<String>,
    /// Reminder as method:duration, e.g. popup:30m or email:1d. Repeatable (max 5).
    #[arg(long = "reminder")]
    pub reminders: Vec<String>,
    /// Event color ID (1-11).
    #[arg(long)]
    pub event_color: Option<String>,
    /// default, public, private or confidential.
    #[arg(long)]
    pub visibility: Option<String>,
    /// opaque (busy) or transparent (free).
    #[arg(long)]
    pub transparency: Option<String>,
    /// Guest notifications: all, externalOnly or none.
    #[arg(long)]
    pub send_updates: Option<String>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub guests_can_invite: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub guests_can_modify: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub guests_can_see_others: Option<bool>,
    /// Attach a new video meeting.
    #[arg(long)]
    pub with_meet: bool,
    /// URL the event was created or imported from.
    #[arg(long)]
    pub source_url: Option<String>,
    #[arg(long)]
    pub source_title: Option<String>,
    /// File attachment URL. Repeatable.
    #[arg(long = "attachment")]
    pub attachments: Vec<String>,
    /// Private extended property as key=value. Repeatable.
    #[arg(long = "private-prop")]
    pub private_props: Vec<String>,
    /// Shared extended property as key=value. Repeatable.
    #[arg(long = "shared-prop")]
    pub shared_props: Vec<String>,
}

impl CreateArgs {
    /// Validates the flags and builds the event to insert.
    pub fn to_event(&self) -> Result<(Event, InsertOptions)> {
        let summary = self.summary.trim();
        if summary.is_empty() || self.from.trim().is_empty() || self.to.trim().is_empty() {
            return Err(EventError::validation("required: --summary, --from, --to"));
        }
        validate_event_time(&self.from, self.all_day)?;
        validate_event_time(&self.to, self.all_day)?;

        let reminders = parse_reminders(&self.reminders)?.map(Reminders::custom);
        let mut event = Event::new(
            summary,
            build_event_date_time(&self.from, self.all_day),
            build_event_date_time(&self.to, self.all_day),
        );
        event.description = non_blank(self.description.as_deref());
        event.location = non_blank(self.location.as_deref());
        event.attendees = build_attendees(self.attendees.as_deref().unwrap_or_default());
        event.recurrence = build_recurrence(&self.rrule);
        event.reminders = reminders;
        event.color_id = validate_color_id(self.event_color.as_deref().unwrap_or_default())?;
        event.visibility = validate_visibility(self.visibility.as_deref().unwrap_or_default())?;
        event.transparency =
            validate_transparency(self.transparency.as_deref().unwrap_or_default())?;
        event.guests_can_invite_others = self.guests_can_invite;
        event.guests_can_modify = self.guests_can_modify;
        event.guests_can_see_other_guests = self.guests_can_see_others;
        event.conference_data = self.with_meet.then(build_conference_data);
        event.attachments = build_attachments(&self.attachments);
        event.source = build_source(
            self.source_url.as_deref().unwrap_or_default(),
            self.source_title.as_deref().unwrap_or_default(),
        );
        event.extended_properties =
            build_extended_properties(&self.private_props, &self.shared_props)?;

        let options = InsertOptions {
            send_updates: validate_send_updates(self.send_updates.as_deref().unwrap_or_default())?,
            conference_data_version: self.with_meet.then_some(1),
            supports_attachments: !event.attachments.is_empty(),
        };
        Ok((event, options))
    }
}

/// Flags for `events update`.
///
/// Every attribute flag is optional; a flag given with an empty value
/// clears that attribute.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Calendar ID.
    pub calendar_id: String,
    /// Event ID (the series ID for recurring events).
    pub event_id: String,
    #[arg(long)]
    pub summary: Option<String>,
    /// New start time.
    #[arg(long)]
    pub from: Option<String>,
    /// New end time.
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// Comma-separated attendee emails; replaces all attendees.
    #[arg(long)]
    pub attendees: Option<String>,
    /// Comma-separated attendee emails to add to the existing ones.
    #[arg(long)]
    pub add_attendee: Option<String>,
    /// Switch to an all-day event (requires --from and --to).
    #[arg(long)]
    pub all_day: bool,
    /// Recurrence rule. Repeatable; pass '' to remove the recurrence.
    #[arg(long = "rrule")]
    pub rrule: Option<Vec<String>>,
    /// Reminder as method:duration. Repeatable; pass '' for calendar defaults.
    #[arg(long = "reminder")]
    pub reminders: Option<Vec<String>>,
    #[arg(long)]
    pub event_color: Option<String>,
    #[arg(long)]
    pub visibility: Option<String>,
    #[arg(long)]
    pub transparency: Option<String>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub guests_can_invite: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub guests_can_modify: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub guests_can_see_others: Option<bool>,
    /// For recurring events: single, future or all.
    #[arg(long, default_value = "all")]
    pub scope: Scope,
    /// Original start of the instance (required for --scope single/future).
    #[arg(long)]
    pub original_start: Option<String>,
    /// Private extended property as key=value. Repeatable.
    #[arg(long = "private-prop")]
    pub private_props: Option<Vec<String>>,
    /// Shared extended property as key=value. Repeatable.
    #[arg(long = "shared-prop")]
    pub shared_props: Option<Vec<String>>,
}

impl UpdateArgs {
    /// The validated scope of the update.
    pub fn event_scope(&self) -> Result<EventScope> {
        EventScope::new(self.scope, self.original_start.as_deref())
    }

    /// Validates the flags and builds the patch.
    ///
    /// `--add-attendee` is not part of the patch yet; it needs the current
    /// attendee list from the server.
    pub fn to_patch(&self) -> Result<EventPatch> {
        if self.all_day && (self.from.is_none() || self.to.is_none()) {
            return Err(EventError::validation(
                "when changing --all-day, also provide --from and --to",
            ));
        }
        if self.attendees.is_some() && self.add_attendee.is_some() {
            return Err(EventError::validation(
                "cannot use both --attendees and --add-attendee; use --attendees to replace all, or --add-attendee to add",
            ));
        }

        let mut patch = EventPatch {
            summary: text_field(self.summary.as_deref()),
            description: text_field(self.description.as_deref()),
            location: text_field(self.location.as_deref()),
            ..EventPatch::default()
        };

        if let Some(from) = &self.from {
            validate_event_time(from, self.all_day)?;
            patch.start = Field::Set(build_event_date_time(from, self.all_day));
        }
        if let Some(to) = &self.to {
            validate_event_time(to, self.all_day)?;
            patch.end = Field::Set(build_event_date_time(to, self.all_day));
        }
        if let Some(attendees) = &self.attendees {
            patch.attendees = list_field(build_attendees(attendees));
        }
        if let Some(rules) = &self.rrule {
            patch.recurrence = list_field(build_recurrence(rules));
        }
        if let Some(specs) = &self.reminders {
            let reminders = parse_reminders(specs)?
                .map_or_else(Reminders::calendar_default, Reminders::custom);
            patch.reminders = Field::Set(reminders);
        }
        if let Some(color) = &self.event_color {
            patch.color_id = Field::set_or_clear(validate_color_id(color)?);
        }
        if let Some(visibility) = &self.visibility {
            patch.visibility = Field::set_or_clear(validate_visibility(visibility)?);
        }
        if let Some(transparency) = &self.transparency {
            patch.transparency = Field::set_or_clear(validate_transparency(transparency)?);
        }
        if let Some(value) = self.guests_can_invite {
            patch.guests_can_invite_others = Field::Set(value);
        }
        if let Some(value) = self.guests_can_modify {
            patch.guests_can_modify = Field::Set(value);
        }
        if let Some(value) = self.guests_can_see_others {
            patch.guests_can_see_other_guests = Field::Set(value);
        }
        // Properties are merged into the stored ones; blank values add nothing.
        if let Some(properties) = build_extended_properties(
            self.private_props.as_deref().unwrap_or_default(),
            self.shared_props.as_deref().unwrap_or_default(),
        )? {
            patch.extended_properties = Field::Set(properties);
        }

        if patch.is_empty() && self.add_attendee.is_none() {
            return Err(EventError::validation("no updates provided"));
        }
        Ok(patch)
    }
}

/// Flags for `events delete`.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Calendar ID.
    pub calendar_id: String,
    /// Event ID (the series ID for recurring events).
    pub event_id: String,
    /// For recurring events: single, future or all.
    #[arg(long, default_value = "all")]
    pub scope: Scope,
    /// Original start of the instance (required for --scope single/future).
    #[arg(long)]
    pub original_start: Option<String>,
}

impl DeleteArgs {
    /// The validated scope of the delete.
    pub fn event_scope(&self) -> Result<EventScope> {
        EventScope::new(self.scope, self.original_start.as_deref())
    }

    /// What the confirmation prompt says will happen.
    pub fn confirm_message(&self, scope: &EventScope) -> String {
        let (event_id, calendar_id) = (self.event_id.trim(), self.calendar_id.trim());
        match scope {
            EventScope::All => format!("delete event {event_id} from calendar {calendar_id}"),
            EventScope::Single { original_start } => format!(
                "delete event {event_id} (instance start {original_start}) from calendar {calendar_id}"
            ),
            EventScope::Future { original_start } => format!(
                "delete event {event_id} (instance start {original_start}) and all following from calendar {calendar_id}"
            ),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A free-text flag: absent leaves the value alone, blank clears it.
fn text_field(value: Option<&str>) -> Field<String> {
    match value {
        None => Field::Unset,
        Some(value) => Field::set_or_clear(non_blank(Some(value))),
    }
}

fn list_field<T>(values: Vec<T>) -> Field<Vec<T>> {
    if values.is_empty() {
        Field::Cleared
    } else {
        Field::Set(values)
    }
}
