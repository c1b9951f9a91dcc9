//! Core domain logic for the sitter workload engine.
//!
//! This crate contains:
//! - Classification: deciding which calendar entries are billable visits
//!   and annotating them with service type, visit type and title metadata
//! - Day arithmetic: which entries touch a day and for how many minutes
//! - Workload analysis: daily minutes, travel estimates, level banding,
//!   weekly totals and period-over-period comparison
//!
//! Everything here is pure and synchronous; loading events and printing
//! reports live in `wl-cli`.

pub mod calendar;
pub mod classifier;
mod config;
pub mod event;
pub mod event_type;
pub mod rules;
mod stats;
mod travel;
mod types;
mod workload;

pub use calendar::{
    DayFilter, MINUTES_PER_DAY, Scheduled, duration_for_day, events_on_day, overlaps_day,
};
pub use classifier::{
    classify, classify_all, classify_event, detect_event_type, detect_overnight,
    extract_duration, extract_sequence_marker, is_overnight_end_date,
};
pub use config::{
    AVG_TREND_DEADBAND, AnalyzerConfig, HOURS_TREND_DEADBAND, LevelThresholds,
    TRAVEL_MINUTES_PER_LEG, WEEK_TREND_DEADBAND_HOURS,
};
pub use event::{CalendarEvent, ClassifiedEvent};
pub use event_type::{EventType, SequenceMarker, ServiceType};
pub use rules::{Category, Classification, RuleTable};
pub use stats::{
    DAYS_PER_WEEK, DayMetrics, MetricComparison, PeriodComparison, Trend, WeekComparison,
    WeeklyStats, period_comparison, week_comparison, weekly_stats,
};
pub use travel::{estimate_travel_minutes, travel_legs};
pub use types::{EventId, ValidationError};
pub use workload::{Housesit, WorkloadLevel, WorkloadMetrics, daily_metrics};
