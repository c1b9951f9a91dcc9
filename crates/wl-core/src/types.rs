//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A tag string did not name a known variant.
    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

impl ValidationError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}

/// A validated calendar event identifier.
///
/// Event IDs must be non-empty strings. They are assigned by the calendar
/// source and are never generated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventId(String);

impl EventId {
    /// Creates a new ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::Empty { field: "event ID" });
        }
        Ok(Self(id))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventId> for String {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_rejects_blank() {
        assert_eq!(
            EventId::new("   ").unwrap_err(),
            ValidationError::Empty { field: "event ID" }
        );
        assert!(EventId::new("").is_err());
    }

    #[test]
    fn event_id_serde_roundtrip() {
        let id = EventId::new("evt-42").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"evt-42\"");
        let parsed: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn event_id_deserialize_rejects_empty() {
        let result: Result<EventId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_variant_message() {
        let err = ValidationError::unknown("service type", "grooming");
        assert_eq!(err.to_string(), "unknown service type: grooming");
    }
}
