//! Output formatting functions.

pub mod json;
pub mod pretty;

use calctl_core::event::Event;
use calctl_core::recurrence::DeleteOutcome;

use crate::cli::OutputFormat;

/// Format an event for output.
pub fn format_event(event: &Event, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_event(event),
        OutputFormat::Pretty => pretty::format_event(event),
    }
}

/// Format the result of a delete for output.
pub fn format_deleted(outcome: &DeleteOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_deleted(outcome),
        OutputFormat::Pretty => pretty::format_deleted(outcome),
    }
}
