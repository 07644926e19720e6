//! Partial event updates.

use serde::{Deserialize, Serialize};

use super::field::Field;
use super::types::{Attendee, Event, EventDateTime, ExtendedProperties, Reminders};

/// Body of a PATCH request against an event resource.
///
/// Attributes left [`Field::Unset`] are omitted, so the server keeps them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub summary: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub location: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub start: Field<EventDateTime>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub end: Field<EventDateTime>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub attendees: Field<Vec<Attendee>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub recurrence: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub reminders: Field<Reminders>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub color_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub visibility: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub transparency: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub guests_can_invite_others: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub guests_can_modify: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub guests_can_see_other_guests: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub extended_properties: Field<ExtendedProperties>,
}

impl EventPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch that only replaces the recurrence rules.
    pub fn recurrence(rules: Vec<String>) -> Self {
        Self {
            recurrence: Field::Set(rules),
            ..Self::default()
        }
    }

    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the patch to a local copy of an event, the way the server
    /// applies it to the stored resource.
    pub fn apply_to(self, event: &mut Event) {
        self.summary.apply_to(&mut event.summary);
        self.description.apply_to(&mut event.description);
        self.location.apply_to(&mut event.location);
        self.start.apply_to(&mut event.start);
        self.end.apply_to(&mut event.end);
        apply_list(self.attendees, &mut event.attendees);
        apply_list(self.recurrence, &mut event.recurrence);
        self.reminders.apply_to(&mut event.reminders);
        self.color_id.apply_to(&mut event.color_id);
        self.visibility.apply_to(&mut event.visibility);
        self.transparency.apply_to(&mut event.transparency);
        self.guests_can_invite_others
            .apply_to(&mut event.guests_can_invite_others);
        self.guests_can_modify.apply_to(&mut event.guests_can_modify);
        self.guests_can_see_other_guests
            .apply_to(&mut event.guests_can_see_other_guests);
        merge_properties(self.extended_properties, &mut event.extended_properties);
    }
}

/// Extended properties are merged key by key; keys the patch doesn't name
/// keep their stored values.
fn merge_properties(field: Field<ExtendedProperties>, target: &mut Option<ExtendedProperties>) {
    match field {
        Field::Unset => {}
        Field::Set(properties) => {
            let stored = target.get_or_insert_with(ExtendedProperties::default);
            stored.private.extend(properties.private);
            stored.shared.extend(properties.shared);
        }
        Field::Cleared => *target = None,
    }
}

fn apply_list<T>(field: Field<Vec<T>>, target: &mut Vec<T>) {
    match field {
        Field::Unset => {}
        Field::Set(values) => *target = values,
        Field::Cleared => target.clear(),
    }
}
