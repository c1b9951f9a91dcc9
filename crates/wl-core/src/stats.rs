//! Multi-day aggregation and period-over-period comparison.

use chrono::{Days, NaiveDate, NaiveDateTime};
use rayon::prelude::*;
use serde::Serialize;

use crate::calendar::{Scheduled, days_from, raw_hours};
use crate::config::AnalyzerConfig;
use crate::event::ClassifiedEvent;
use crate::workload::{WorkloadMetrics, daily_metrics, minutes_to_hours};

/// Days in a comparison week.
pub const DAYS_PER_WEEK: usize = 7;

/// Direction of change between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

impl Trend {
    /// Classifies a difference; changes within `±deadband` are neutral.
    pub fn from_diff(diff: f64, deadband: f64) -> Self {
        let deadband = deadband.abs();
        if diff > deadband {
            Self::Positive
        } else if diff < -deadband {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// Metrics for one dated day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayMetrics {
    pub date: NaiveDate,
    pub metrics: WorkloadMetrics,
}

/// Seven days of workload with totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub days: Vec<DayMetrics>,
    pub total_work_minutes: i64,
    pub total_travel_minutes: i64,
    pub total_minutes: i64,
    pub total_hours: f64,
    pub total_work_events: usize,
    /// Days with at least one non-overnight work event.
    pub days_with_work: usize,
    /// `total_hours / days_with_work`, or 0 with no working days.
    pub avg_hours_per_day: f64,
}

/// Computes daily metrics for the seven days starting at `week_start`.
pub fn weekly_stats(
    events: &[ClassifiedEvent],
    week_start: NaiveDate,
    config: &AnalyzerConfig,
) -> WeeklyStats {
    let dates: Vec<NaiveDate> = days_from(week_start, DAYS_PER_WEEK).collect();
    let days: Vec<DayMetrics> = dates
        .par_iter()
        .map(|&date| DayMetrics {
            date,
            metrics: daily_metrics(events, date, config),
        })
        .collect();

    let total_work_minutes: i64 = days.iter().map(|d| d.metrics.work_minutes).sum();
    let total_travel_minutes: i64 = days.iter().map(|d| d.metrics.travel_minutes).sum();
    let total_minutes = total_work_minutes + total_travel_minutes;
    let total_hours = minutes_to_hours(total_minutes);
    let total_work_events = days.iter().map(|d| d.metrics.work_event_count).sum();
    let days_with_work = days
        .iter()
        .filter(|d| d.metrics.work_event_count > 0)
        .count();

    WeeklyStats {
        week_start,
        days,
        total_work_minutes,
        total_travel_minutes,
        total_minutes,
        total_hours,
        total_work_events,
        days_with_work,
        avg_hours_per_day: safe_ratio(total_hours, count_as_f64(days_with_work)),
    }
}

/// This week against the one before.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekComparison {
    pub this_week: WeeklyStats,
    pub last_week: WeeklyStats,
    /// `this_week.total_hours - last_week.total_hours`.
    pub diff: f64,
    pub trend: Trend,
}

/// Compares the week starting at `reference` (normalised to midnight) with
/// the week before it. Travel is always included.
pub fn week_comparison(
    events: &[ClassifiedEvent],
    reference: NaiveDateTime,
    config: &AnalyzerConfig,
) -> WeekComparison {
    let this_start = reference.date();
    let last_start = this_start
        .checked_sub_days(Days::new(7))
        .unwrap_or(NaiveDate::MIN);
    let config = config.with_travel(true);

    let this_week = weekly_stats(events, this_start, &config);
    let last_week = weekly_stats(events, last_start, &config);
    let diff = this_week.total_hours - last_week.total_hours;

    WeekComparison {
        trend: Trend::from_diff(diff, config.week_trend_deadband),
        this_week,
        last_week,
        diff,
    }
}

/// One metric across two periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricComparison {
    pub current: f64,
    pub previous: f64,
    pub diff: f64,
    /// Change relative to `previous`, in percent; 0 when `previous` is 0.
    pub percent: f64,
    pub trend: Trend,
}

impl MetricComparison {
    pub fn new(current: f64, previous: f64, deadband: f64) -> Self {
        let diff = current - previous;
        Self {
            current,
            previous,
            diff,
            percent: safe_ratio(diff, previous) * 100.0,
            trend: Trend::from_diff(diff, deadband),
        }
    }
}

/// Appointment count, hours, and hours per day across two periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub appointments: MetricComparison,
    pub total_hours: MetricComparison,
    pub avg_hours_per_day: MetricComparison,
}

/// Compares two event sets covering `current_days` and `previous_days`.
///
/// Hours come from raw start/end deltas, independent of classification.
pub fn period_comparison<E: Scheduled>(
    current: &[E],
    previous: &[E],
    current_days: u32,
    previous_days: u32,
    config: &AnalyzerConfig,
) -> PeriodComparison {
    let current_hours: f64 = current.iter().map(raw_hours).sum();
    let previous_hours: f64 = previous.iter().map(raw_hours).sum();

    PeriodComparison {
        appointments: MetricComparison::new(
            count_as_f64(current.len()),
            count_as_f64(previous.len()),
            0.0,
        ),
        total_hours: MetricComparison::new(
            current_hours,
            previous_hours,
            config.hours_trend_deadband,
        ),
        avg_hours_per_day: MetricComparison::new(
            safe_ratio(current_hours, f64::from(current_days)),
            safe_ratio(previous_hours, f64::from(previous_days)),
            config.avg_trend_deadband,
        ),
    }
}

/// `numerator / denominator`, or 0 when the result would not be finite.
fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() { ratio } else { 0.0 }
}

#[allow(clippy::cast_precision_loss)]
const fn count_as_f64(count: usize) -> f64 {
    count as f64
}
