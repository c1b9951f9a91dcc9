//! Analyzer tuning: travel cost, level thresholds, trend deadbands.

use serde::{Deserialize, Serialize};

/// Flat travel charge per leg, in minutes.
pub const TRAVEL_MINUTES_PER_LEG: i64 = 15;

/// Week-over-week hours change treated as no change.
pub const WEEK_TREND_DEADBAND_HOURS: f64 = 0.5;

/// Period total-hours change treated as no change.
pub const HOURS_TREND_DEADBAND: f64 = 1.0;

/// Period average-hours-per-day change treated as no change.
pub const AVG_TREND_DEADBAND: f64 = 0.5;

/// Lower bounds (inclusive, in hours) of each workload level above `light`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelThresholds {
    pub comfortable: f64,
    pub busy: f64,
    pub high: f64,
    pub burnout: f64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            comfortable: 6.0,
            busy: 8.0,
            high: 10.0,
            burnout: 12.0,
        }
    }
}

/// Configuration for workload analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Add the travel estimate to daily totals. Default: true.
    pub include_travel: bool,

    /// Per-leg travel charge. Default: 15.
    pub travel_minutes_per_leg: i64,

    pub thresholds: LevelThresholds,

    /// Default: 0.5 hours.
    pub week_trend_deadband: f64,

    /// Default: 1.0 hours.
    pub hours_trend_deadband: f64,

    /// Default: 0.5 hours per day.
    pub avg_trend_deadband: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            include_travel: true,
            travel_minutes_per_leg: TRAVEL_MINUTES_PER_LEG,
            thresholds: LevelThresholds::default(),
            week_trend_deadband: WEEK_TREND_DEADBAND_HOURS,
            hours_trend_deadband: HOURS_TREND_DEADBAND,
            avg_trend_deadband: AVG_TREND_DEADBAND,
        }
    }
}

impl AnalyzerConfig {
    /// Same configuration with travel switched on or off.
    #[must_use]
    pub fn with_travel(&self, include_travel: bool) -> Self {
        Self {
            include_travel,
            ..self.clone()
        }
    }
}
