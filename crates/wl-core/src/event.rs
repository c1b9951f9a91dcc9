//! Calendar entries as supplied by the calendar source, and their classified form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::event_type::{EventType, SequenceMarker, ServiceType};
use crate::types::EventId;

/// A raw calendar entry.
///
/// Owned by the calendar source. Nothing in this crate creates or mutates
/// these; classification returns an annotated copy instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Identifier assigned by the calendar source.
    pub id: EventId,
    /// Entry title. Non-string titles are read as `None`.
    #[serde(default, deserialize_with = "lenient_title")]
    pub title: Option<String>,
    /// Local wall-clock start.
    #[serde(with = "wall_clock")]
    pub start: NaiveDateTime,
    /// Local wall-clock end.
    #[serde(with = "wall_clock")]
    pub end: NaiveDateTime,
    #[serde(default, alias = "is_all_day")]
    pub is_all_day: bool,
    /// Hidden by the user; excluded from workload.
    #[serde(default)]
    pub ignored: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Explicit type tag from the source (e.g. `"overnight"`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl CalendarEvent {
    /// Creates a timed event with no location or type tag.
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title: Some(title.into()),
            start,
            end,
            is_all_day: false,
            ignored: false,
            location: None,
            kind: None,
        }
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the explicit type tag.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Whether the source explicitly tagged this entry as an overnight stay.
    pub fn is_tagged_overnight(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|k| k.trim().eq_ignore_ascii_case("overnight"))
    }

    /// Whether the entry has a non-blank location.
    pub fn has_location(&self) -> bool {
        self.location.as_deref().is_some_and(|l| !l.trim().is_empty())
    }
}

/// A calendar entry annotated with the classifier's verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEvent {
    #[serde(flatten)]
    pub event: CalendarEvent,
    /// Billable appointment (as opposed to a personal entry).
    pub is_work_event: bool,
    pub is_overnight: bool,
    pub service_type: ServiceType,
    pub event_type: EventType,
    /// Visit length parsed from a `- 30` style suffix.
    pub extracted_duration: Option<u32>,
    pub sequence_marker: Option<SequenceMarker>,
    /// Name of the rule that decided the verdict, if any matched.
    pub matched_rule: Option<&'static str>,
}

impl ClassifiedEvent {
    /// Work event that counts toward the schedule: not hidden and not all-day.
    pub fn is_countable_work(&self) -> bool {
        self.is_work_event && !self.event.ignored && !self.event.is_all_day
    }
}

fn lenient_title<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Serde helpers for local wall-clock timestamps.
///
/// Accepts RFC 3339 (converted to the local zone), naive date-times with or
/// without seconds, and bare dates (read as midnight).
pub mod wall_clock {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    /// Parses a timestamp string in any accepted form.
    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(OUTPUT_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn deserializes_source_shape() {
        let json = r#"{
            "id": "abc",
            "title": "Fluffy - 30",
            "start": "2025-03-10T09:00:00",
            "end": "2025-03-10T09:30",
            "isAllDay": false,
            "ignored": true,
            "location": "12 Elm St",
            "type": "overnight"
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id.as_str(), "abc");
        assert_eq!(event.title.as_deref(), Some("Fluffy - 30"));
        assert_eq!(event.start, at(9, 0));
        assert_eq!(event.end, at(9, 30));
        assert!(event.ignored);
        assert!(event.is_tagged_overnight());
        assert!(event.has_location());
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{"id": "x", "start": "2025-03-10", "end": "2025-03-11"}"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, None);
        assert!(!event.is_all_day);
        assert!(!event.ignored);
        assert_eq!(event.start, at(0, 0));
    }

    #[test]
    fn non_string_title_reads_as_none() {
        let json = r#"{"id": "x", "title": 42, "start": "2025-03-10T09:00", "end": "2025-03-10T10:00"}"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, None);
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let json = r#"{"id": "x", "title": "a", "start": "yesterday", "end": "2025-03-10T10:00"}"#;
        let result: Result<CalendarEvent, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn blank_location_is_not_a_location() {
        let event = CalendarEvent::new(EventId::new("1").unwrap(), "Rex - 30", at(9, 0), at(9, 30))
            .with_location("  ");
        assert!(!event.has_location());
    }

    #[test]
    fn serializes_wall_clock_without_offset() {
        let event = CalendarEvent::new(EventId::new("1").unwrap(), "Rex - 30", at(9, 0), at(9, 30));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["start"], "2025-03-10T09:00:00");
        assert_eq!(json["isAllDay"], false);
        assert!(json.get("type").is_none());
    }
}
