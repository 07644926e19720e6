mod operations;
mod scope;
mod truncate;

pub use operations::{add_attendees, delete_event, update_event, DeleteOutcome};
pub use scope::{resolve_instance_id, resolve_scope, EventScope, Scope, ScopeTarget};
pub use truncate::truncate_recurrence;
