//! Event classification: work vs personal, service and visit type, and
//! title metadata.
//!
//! All functions are pure. [`classify_event`] returns an annotated copy and
//! leaves the source event untouched.

use std::sync::LazyLock;

use chrono::NaiveDate;
use rayon::prelude::*;
use regex::Regex;

use crate::event::{CalendarEvent, ClassifiedEvent};
use crate::event_type::{EventType, SequenceMarker, ServiceType};
use crate::rules::{
    self, Category, Classification, HOUSESIT_SUFFIX_PATTERN, MEET_GREET_PATTERN,
    MINUTES_PATTERN, OVERNIGHT_PATTERN, RuleTable, strip_parentheticals,
};

static OVERNIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(OVERNIGHT_PATTERN).expect("overnight pattern is valid"));

static HOUSESIT_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(HOUSESIT_SUFFIX_PATTERN).expect("housesit suffix pattern is valid")
});

static MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MINUTES_PATTERN).expect("minutes pattern is valid"));

static MEET_GREET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MEET_GREET_PATTERN).expect("meet-greet pattern is valid"));

/// Classifies a title as work or personal using the standard rule table.
///
/// A missing title is personal.
pub fn classify(title: Option<&str>) -> Classification {
    title.map_or(Classification::UNMATCHED, |t| {
        RuleTable::standard().classify(t)
    })
}

/// Whether the event is an overnight stay, by explicit type tag or title.
pub fn detect_overnight(event: &CalendarEvent) -> bool {
    event.is_tagged_overnight() || event.title.as_deref().is_some_and(title_is_overnight)
}

/// Asides in parentheses are ignored, as in [`classify`].
fn title_is_overnight(title: &str) -> bool {
    OVERNIGHT_RE.is_match(&strip_parentheticals(title))
}

/// True only on the final day of an overnight stay that spans days.
pub fn is_overnight_end_date(event: &CalendarEvent, day: NaiveDate) -> bool {
    let start_day = event.start.date();
    let end_day = event.end.date();
    end_day != start_day && day == end_day
}

/// Visit shape from the title.
///
/// Precedence: overnight, meet-greet, 15/20/30 minutes, 45/60 minutes, walk,
/// other.
pub fn detect_event_type(title: &str) -> EventType {
    let cleaned = strip_parentheticals(title);
    if title_is_overnight(&cleaned) {
        return EventType::Overnight;
    }
    if MEET_GREET_RE.is_match(&cleaned) {
        return EventType::MeetGreet;
    }
    match minutes_in(&cleaned) {
        Some(15 | 20 | 30) => return EventType::ShortVisit,
        Some(45 | 60) => return EventType::LongVisit,
        _ => {}
    }
    if cleaned.to_lowercase().contains("walk") {
        return EventType::Walk;
    }
    EventType::Other
}

fn minutes_in(cleaned: &str) -> Option<u32> {
    MINUTES_RE
        .captures(cleaned)
        .and_then(|caps| rules::capture_minutes(&caps))
}

/// Visit length from a `- 30` style suffix.
pub fn extract_duration(title: &str) -> Option<u32> {
    minutes_in(&strip_parentheticals(title))
}

/// `Start`/`1st`/`2nd`/`3rd`/`Last` from the minutes or house-sit suffix.
pub fn extract_sequence_marker(title: &str) -> Option<SequenceMarker> {
    let cleaned = strip_parentheticals(title);
    MINUTES_RE
        .captures(&cleaned)
        .and_then(|caps| rules::capture_marker(&caps))
        .or_else(|| {
            HOUSESIT_SUFFIX_RE
                .captures(&cleaned)
                .and_then(|caps| rules::capture_marker(&caps))
        })
}

/// Returns an annotated copy of the event.
///
/// An explicit `overnight` type tag makes the event work when no exclusion
/// rule fired on its title.
pub fn classify_event(event: &CalendarEvent) -> ClassifiedEvent {
    let Some(title) = event.title.as_deref() else {
        return unclassified(event);
    };

    let verdict = classify(Some(title));
    let is_overnight = detect_overnight(event);
    let excluded = verdict.category == Category::Personal && verdict.rule.is_some();
    let tag_promotes = !verdict.is_work() && !excluded && event.is_tagged_overnight();
    let is_work_event = verdict.is_work() || tag_promotes;

    let service_type = if is_work_event && is_overnight {
        ServiceType::Overnight
    } else {
        verdict.service_type
    };
    let event_type = if is_overnight {
        EventType::Overnight
    } else {
        detect_event_type(title)
    };

    ClassifiedEvent {
        event: event.clone(),
        is_work_event,
        is_overnight,
        service_type,
        event_type,
        extracted_duration: extract_duration(title),
        sequence_marker: extract_sequence_marker(title),
        matched_rule: if tag_promotes {
            Some("overnight-tag")
        } else {
            verdict.rule
        },
    }
}

fn unclassified(event: &CalendarEvent) -> ClassifiedEvent {
    ClassifiedEvent {
        event: event.clone(),
        is_work_event: false,
        is_overnight: false,
        service_type: ServiceType::Other,
        event_type: EventType::Other,
        extracted_duration: None,
        sequence_marker: None,
        matched_rule: None,
    }
}

/// Classifies a batch in parallel, preserving input order.
pub fn classify_all(events: &[CalendarEvent]) -> Vec<ClassifiedEvent> {
    let classified: Vec<_> = events.par_iter().map(classify_event).collect();
    tracing::debug!(
        total = classified.len(),
        work = classified.iter().filter(|e| e.is_work_event).count(),
        "classified events"
    );
    classified
}
