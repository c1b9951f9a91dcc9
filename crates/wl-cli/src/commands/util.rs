//! Shared formatting and date helpers for CLI commands.

use chrono::{Datelike, NaiveDate};
use wl_core::Trend;

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let days_since_monday = date.weekday().num_days_from_monday();
    date - chrono::Duration::days(i64::from(days_since_monday))
}

/// Formats minutes as "Xh Ym" if >= 1 hour, "Xm" otherwise.
/// Negative durations are shown as 0m.
pub fn format_duration(minutes: i64) -> String {
    if minutes < 0 {
        return "0m".to_string();
    }
    let hours = minutes / 60;
    let minutes = minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Formats fractional hours as "Xh Ym", rounding to the nearest minute.
#[allow(clippy::cast_possible_truncation)]
pub fn format_hours(hours: f64) -> String {
    format_duration((hours * 60.0).round() as i64)
}

/// Generates a 10-character bar.
/// Nonzero values below 5% of max get a single block for visibility.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn progress_bar(value: i64, max: i64) -> String {
    if max <= 0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value.max(0) as f64 / max as f64;
    let filled = if ratio < 0.05 && value > 0 {
        1
    } else {
        // Days past the maximum still fill the bar exactly.
        (ratio * 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Signed number with a fixed precision, e.g. "+2.5" or "-0.3".
pub fn signed(value: f64, precision: usize) -> String {
    let value = if value.abs() < 0.5 * 10f64.powi(-i32::try_from(precision).unwrap_or(0)) {
        0.0
    } else {
        value
    };
    if value > 0.0 {
        format!("+{value:.precision$}")
    } else {
        format!("{value:.precision$}")
    }
}

/// Arrow for a trend.
pub const fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Positive => "↑",
        Trend::Negative => "↓",
        Trend::Neutral => "→",
    }
}
