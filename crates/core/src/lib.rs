//! calctl_core - functional core of the calctl calendar client.
//!
//! Event types, attribute validation, recurrence scope handling and the
//! [`remote::EventsApi`] contract the client crate implements over HTTP.

pub mod event;
pub mod recurrence;
pub mod remote;
