mod builders;
mod error;
mod field;
mod patch;
mod types;
mod validation;

pub use builders::{
    build_attachments, build_attendees, build_conference_data, build_event_date_time,
    build_extended_properties, build_recurrence, build_source, merge_attendees,
};
pub use error::{EventError, Result};
pub use field::Field;
pub use patch::EventPatch;
pub use types::{
    Attachment, Attendee, ConferenceData, ConferenceSolutionKey, CreateConferenceRequest,
    EntryPoint, Event, EventDateTime, EventSource, ExtendedProperties, ReminderOverride,
    Reminders,
};
pub use validation::{
    parse_reminder, parse_reminders, validate_color_id, validate_event_time,
    validate_send_updates, validate_transparency, validate_visibility, MAX_REMINDERS,
};
