//! Loading calendar events exported by the calendar sync.
//!
//! Accepts a JSON array, an object with an `events` array, or JSON Lines.
//! Records that fail to parse are skipped with a warning.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use wl_core::CalendarEvent;

/// Reads events from `path`, or from stdin when `path` is `-`.
pub fn load_events(path: &Path) -> Result<Vec<CalendarEvent>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read events from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read events from {}", path.display()))?
    };
    let events = parse_events(&text)?;
    tracing::debug!(count = events.len(), path = %path.display(), "loaded events");
    Ok(events)
}

/// Parses events from text.
pub fn parse_events(text: &str) -> Result<Vec<CalendarEvent>> {
    let trimmed = text.trim_start();
    let records: Vec<(usize, Value)> = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Array(values)) => numbered(values),
            Ok(Value::Object(mut object)) if object.contains_key("events") => {
                match object.remove("events") {
                    Some(Value::Array(values)) => numbered(values),
                    _ => anyhow::bail!("`events` must be an array"),
                }
            }
            // A single-line object is also valid JSON Lines.
            Ok(Value::Object(_)) | Err(_) if trimmed.starts_with('{') => parse_lines(text),
            Ok(_) => anyhow::bail!("expected an array of events"),
            Err(e) => return Err(e).context("invalid JSON"),
        }
    } else {
        parse_lines(text)
    };

    Ok(records
        .into_iter()
        .filter_map(|(n, value)| match serde_json::from_value::<CalendarEvent>(value) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(record = n, error = %e, "skipping invalid event");
                None
            }
        })
        .collect())
}

fn numbered(values: Vec<Value>) -> Vec<(usize, Value)> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| (idx + 1, value))
        .collect()
}

fn parse_lines(text: &str) -> Vec<(usize, Value)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| match serde_json::from_str(line.trim()) {
            Ok(value) => Some((idx + 1, value)),
            Err(e) => {
                tracing::warn!(line = idx + 1, error = %e, "skipping malformed line");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"id": "a", "title": "Rex - 30", "start": "2025-03-10T09:00", "end": "2025-03-10T09:30"}"#;

    #[test]
    fn parses_json_array() {
        let text = format!("[{VALID}, {VALID}]");
        assert_eq!(parse_events(&text).unwrap().len(), 2);
    }

    #[test]
    fn parses_wrapped_events_object() {
        let text = format!(r#"{{"events": [{VALID}]}}"#);
        let events = parse_events(&text).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title.as_deref(), Some("Rex - 30"));
    }

    #[test]
    fn parses_json_lines() {
        let text = format!("{VALID}\n\n{VALID}\n");
        assert_eq!(parse_events(&text).unwrap().len(), 2);
    }

    #[test]
    fn skips_invalid_records() {
        let text = format!(
            r#"[{VALID}, {{"id": "", "start": "2025-03-10", "end": "2025-03-10"}}, {{"id": "b", "start": "soon", "end": "later"}}]"#
        );
        let events = parse_events(&text).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn skips_malformed_lines() {
        let text = format!("{VALID}\nnot json\n{VALID}");
        assert_eq!(parse_events(&text).unwrap().len(), 2);
    }

    #[test]
    fn rejects_non_array_json() {
        assert!(parse_events("[1, 2").is_err());
        assert!(parse_events(r#"{"events": 3}"#).is_err());
    }

    #[test]
    fn empty_input_has_no_events() {
        assert!(parse_events("").unwrap().is_empty());
        assert!(parse_events("[]").unwrap().is_empty());
    }
}
