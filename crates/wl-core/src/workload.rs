//! Daily workload: visit minutes, travel, housesits, and level banding.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{DayFilter, Scheduled, duration_for_day, events_on_day};
use crate::classifier::is_overnight_end_date;
use crate::config::{AnalyzerConfig, LevelThresholds};
use crate::event::ClassifiedEvent;
use crate::travel::estimate_travel_minutes;

/// Banded daily workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadLevel {
    None,
    Light,
    Comfortable,
    Busy,
    High,
    Burnout,
}

impl WorkloadLevel {
    /// Bands total hours. Every bound is lower-inclusive.
    pub fn from_hours(hours: f64, thresholds: &LevelThresholds) -> Self {
        if hours.is_nan() || hours < 0.0 {
            Self::None
        } else if hours < thresholds.comfortable {
            Self::Light
        } else if hours < thresholds.busy {
            Self::Comfortable
        } else if hours < thresholds.high {
            Self::Busy
        } else if hours < thresholds.burnout {
            Self::High
        } else {
            Self::Burnout
        }
    }

    /// Display string.
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "No Work",
            Self::Light => "Light",
            Self::Comfortable => "Comfortable",
            Self::Busy => "Busy",
            Self::High => "High",
            Self::Burnout => "Burnout Risk",
        }
    }
}

/// An overnight stay touching the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Housesit {
    #[serde(flatten)]
    pub event: ClassifiedEvent,
    /// The stay ends on this day (and began on an earlier one).
    pub is_end_date: bool,
}

/// Workload for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadMetrics {
    pub work_minutes: i64,
    pub travel_minutes: i64,
    pub total_minutes: i64,
    pub work_hours: f64,
    pub travel_hours: f64,
    pub total_hours: f64,
    /// Non-overnight work events on the day.
    pub work_event_count: usize,
    pub housesits: Vec<Housesit>,
    pub level: WorkloadLevel,
    pub label: &'static str,
}

impl WorkloadMetrics {
    /// Builds metrics from minute totals, deriving hours and level.
    pub fn from_minutes(
        work_minutes: i64,
        travel_minutes: i64,
        work_event_count: usize,
        housesits: Vec<Housesit>,
        thresholds: &LevelThresholds,
    ) -> Self {
        let work_minutes = work_minutes.max(0);
        let travel_minutes = travel_minutes.max(0);
        let total_minutes = work_minutes + travel_minutes;
        let total_hours = minutes_to_hours(total_minutes);
        let level = if total_minutes == 0 && work_event_count == 0 {
            WorkloadLevel::None
        } else {
            WorkloadLevel::from_hours(total_hours, thresholds)
        };

        Self {
            work_minutes,
            travel_minutes,
            total_minutes,
            work_hours: minutes_to_hours(work_minutes),
            travel_hours: minutes_to_hours(travel_minutes),
            total_hours,
            work_event_count,
            housesits,
            level,
            label: level.label(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}

/// Computes the workload for `day`.
///
/// Only visible, timed work events count. Overnight stays are listed as
/// housesits instead of adding minutes. Travel, when enabled, is estimated
/// over the day's located visits in start order.
pub fn daily_metrics(
    events: &[ClassifiedEvent],
    day: NaiveDate,
    config: &AnalyzerConfig,
) -> WorkloadMetrics {
    let (overnights, mut visits): (Vec<_>, Vec<_>) = events_on_day(events, day, DayFilter::WORKLOAD)
        .into_iter()
        .partition(|e| e.is_overnight);
    // A visit ending exactly at midnight touches the next day for zero minutes.
    visits.retain(|e| e.start().date() == day || duration_for_day(*e, day) > 0);
    visits.sort_by_key(|e| e.start());

    let work_minutes: i64 = visits.iter().map(|e| duration_for_day(*e, day)).sum();
    let travel_minutes = if config.include_travel {
        estimate_travel_minutes(visits.iter().copied(), config.travel_minutes_per_leg)
    } else {
        0
    };
    let housesits = overnights
        .into_iter()
        .map(|e| Housesit {
            event: e.clone(),
            is_end_date: is_overnight_end_date(&e.event, day),
        })
        .collect();

    let metrics = WorkloadMetrics::from_minutes(
        work_minutes,
        travel_minutes,
        visits.len(),
        housesits,
        &config.thresholds,
    );
    tracing::debug!(
        %day,
        work_minutes = metrics.work_minutes,
        travel_minutes = metrics.travel_minutes,
        visits = metrics.work_event_count,
        housesits = metrics.housesits.len(),
        level = metrics.label,
        "daily metrics"
    );
    metrics
}
