//! Classify command: how each calendar entry was read.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use wl_core::ClassifiedEvent;

/// Formats one line per event, in start order.
pub fn format_classified(events: &[ClassifiedEvent]) -> String {
    let mut output = String::new();
    if events.is_empty() {
        output.push_str("No events.\n");
        return output;
    }

    let mut sorted: Vec<_> = events.iter().collect();
    sorted.sort_by_key(|e| e.event.start);

    for e in sorted {
        let category = if e.is_work_event { "work" } else { "personal" };
        let minutes = e
            .extracted_duration
            .map_or_else(|| "-".to_string(), |m| format!("{m}m"));
        let marker = e.sequence_marker.map_or("-", |m| m.as_str());
        let title = e.event.title.as_deref().unwrap_or("(untitled)");
        let rule = e.matched_rule.unwrap_or("-");
        let line = format!(
            "{}  {category:<8}  {:<10}  {:<11}  {minutes:>3}  {marker:<5}  {rule:<13}  {title}",
            e.event.start.format("%Y-%m-%d %H:%M"),
            e.service_type.as_str(),
            e.event_type.as_str(),
        );
        writeln!(output, "{}", line.trim_end()).unwrap();
    }

    let work = events.iter().filter(|e| e.is_work_event).count();
    writeln!(output).unwrap();
    writeln!(output, "{work} of {} events are work.", events.len()).unwrap();
    output
}

/// Runs the classify command.
pub fn run<W: Write>(writer: &mut W, events: &[ClassifiedEvent], json: bool) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(events)?)?;
    } else {
        write!(writer, "{}", format_classified(events))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use insta::assert_snapshot;
    use wl_core::{CalendarEvent, EventId, classify_all};

    fn event(id: &str, title: &str, h: u32, m: u32) -> CalendarEvent {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        CalendarEvent::new(
            EventId::new(id).unwrap(),
            title,
            start,
            start + chrono::TimeDelta::minutes(30),
        )
    }

    #[test]
    fn test_classified_listing() {
        let events = classify_all(&[
            event("b", "Max - 45 - Last", 17, 0),
            event("a", "Fluffy - 30", 9, 0),
            event("c", "✨ off ✨", 12, 0),
        ]);
        assert_snapshot!(format_classified(&events), @r"
        2025-03-10 09:00  work      dropin      short-visit  30m  -      minutes        Fluffy - 30
        2025-03-10 12:00  personal  other       other          -  -      off-day        ✨ off ✨
        2025-03-10 17:00  work      dropin      long-visit   45m  Last   minutes        Max - 45 - Last

        2 of 3 events are work.
        ");
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(format_classified(&[]), "No events.\n");
    }

    #[test]
    fn test_json_output_is_annotated_copy() {
        let events = classify_all(&[event("a", "Fluffy - 30", 9, 0)]);
        let mut out = Vec::new();
        run(&mut out, &events, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["id"], "a");
        assert_eq!(value[0]["title"], "Fluffy - 30");
        assert_eq!(value[0]["isWorkEvent"], true);
        assert_eq!(value[0]["serviceType"], "dropin");
        assert_eq!(value[0]["eventType"], "short-visit");
        assert_eq!(value[0]["extractedDuration"], 30);
        assert_eq!(value[0]["sequenceMarker"], serde_json::Value::Null);
    }
}
