//! Compare command: a week against the week before it.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use wl_core::{AnalyzerConfig, ClassifiedEvent, WeekComparison, WeeklyStats, week_comparison};

use super::util::{format_duration, format_hours, signed, trend_arrow};

fn row(output: &mut String, label: &str, this: &str, last: &str) {
    writeln!(output, "{label:<14}{this:>10}  {last:>10}").unwrap();
}

fn week_rows(output: &mut String, this: &WeeklyStats, last: &WeeklyStats) {
    row(output, "", "This week", "Last week");
    row(
        output,
        "Total:",
        &format_duration(this.total_minutes),
        &format_duration(last.total_minutes),
    );
    row(
        output,
        "Visits:",
        &format_duration(this.total_work_minutes),
        &format_duration(last.total_work_minutes),
    );
    row(
        output,
        "Travel:",
        &format_duration(this.total_travel_minutes),
        &format_duration(last.total_travel_minutes),
    );
    row(
        output,
        "Appointments:",
        &this.total_work_events.to_string(),
        &last.total_work_events.to_string(),
    );
    row(
        output,
        "Days worked:",
        &this.days_with_work.to_string(),
        &last.days_with_work.to_string(),
    );
    row(
        output,
        "Avg per day:",
        &format_hours(this.avg_hours_per_day),
        &format_hours(last.avg_hours_per_day),
    );
}

/// Formats the human-readable comparison.
pub fn format_comparison(comparison: &WeekComparison) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "WEEK OF {} vs {}",
        comparison.this_week.week_start.format("%b %-d, %Y"),
        comparison.last_week.week_start.format("%b %-d, %Y")
    )
    .unwrap();
    writeln!(output).unwrap();
    week_rows(&mut output, &comparison.this_week, &comparison.last_week);
    writeln!(output).unwrap();
    writeln!(
        output,
        "Change: {}h {}",
        signed(comparison.diff, 1),
        trend_arrow(comparison.trend)
    )
    .unwrap();

    output
}

/// Runs the compare command for the week starting at `week_start`.
pub fn run<W: Write>(
    writer: &mut W,
    events: &[ClassifiedEvent],
    week_start: NaiveDate,
    config: &AnalyzerConfig,
    json: bool,
) -> Result<()> {
    let comparison = week_comparison(events, week_start.and_time(NaiveTime::MIN), config);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&comparison)?)?;
    } else {
        write!(writer, "{}", format_comparison(&comparison))?;
    }
    Ok(())
}
