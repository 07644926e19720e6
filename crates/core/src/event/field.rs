//! Tri-state patch fields.
//!
//! A PATCH request distinguishes three cases per attribute: leave the
//! server value alone, replace it, or clear it. `Option<T>` only covers
//! two of them, so patch payloads use [`Field`] instead.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single attribute of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    /// Not part of the request; the server keeps its value.
    #[default]
    Unset,
    /// Replace the server value.
    Set(T),
    /// Explicitly clear the server value (sent as JSON `null`).
    Cleared,
}

impl<T> Field<T> {
    /// Returns true if the field is omitted from the request.
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    /// Returns true if the field is part of the request.
    pub fn is_present(&self) -> bool {
        !self.is_unset()
    }

    /// Returns the new value, if one is being set.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Field::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Builds a field from an optional value, treating `None` as a clear.
    pub fn set_or_clear(value: Option<T>) -> Self {
        value.map_or(Field::Cleared, Field::Set)
    }

    /// Applies this field to a stored optional value.
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Field::Unset => {}
            Field::Set(value) => *target = Some(value),
            Field::Cleared => *target = None,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Set(value) => value.serialize(serializer),
            // Unset is skipped by `skip_serializing_if`; reaching here means null.
            Field::Unset | Field::Cleared => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<T> = Option::deserialize(deserializer)?;
        Ok(Field::set_or_clear(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Patch {
        #[serde(default, skip_serializing_if = "Field::is_unset")]
        summary: Field<String>,
        #[serde(default, skip_serializing_if = "Field::is_unset")]
        color_id: Field<String>,
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let patch = Patch::default();
        assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
    }

    #[test]
    fn test_cleared_serializes_as_null() {
        let patch = Patch {
            summary: Field::Set("Standup".to_string()),
            color_id: Field::Cleared,
        };
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"summary":"Standup","color_id":null}"#
        );
    }

    #[test]
    fn test_deserialize_distinguishes_missing_and_null() {
        let patch: Patch = serde_json::from_str(r#"{"color_id": null}"#).unwrap();
        assert_eq!(patch.summary, Field::Unset);
        assert_eq!(patch.color_id, Field::Cleared);
    }

    #[test]
    fn test_apply_to() {
        let mut value = Some("old".to_string());
        Field::Unset.apply_to(&mut value);
        assert_eq!(value.as_deref(), Some("old"));

        Field::Set("new".to_string()).apply_to(&mut value);
        assert_eq!(value.as_deref(), Some("new"));

        Field::Cleared.apply_to(&mut value);
        assert_eq!(value, None);
    }
}
