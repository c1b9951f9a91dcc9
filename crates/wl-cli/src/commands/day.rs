//! Day command: workload for a single day.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use wl_core::{AnalyzerConfig, ClassifiedEvent, DayMetrics, WorkloadMetrics, daily_metrics};

use super::util::{format_duration, format_hours};

/// Formats the human-readable day report.
pub fn format_day(date: NaiveDate, metrics: &WorkloadMetrics, include_travel: bool) -> String {
    let mut output = String::new();

    writeln!(output, "WORKLOAD: {}", date.format("%A, %b %-d, %Y")).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Level:    {}", metrics.label).unwrap();
    writeln!(
        output,
        "Visits:   {} ({})",
        metrics.work_event_count,
        format_duration(metrics.work_minutes)
    )
    .unwrap();
    if include_travel {
        writeln!(output, "Travel:   {}", format_duration(metrics.travel_minutes)).unwrap();
    } else {
        writeln!(output, "Travel:   (not included)").unwrap();
    }
    writeln!(output, "Total:    {}", format_hours(metrics.total_hours)).unwrap();

    if !metrics.housesits.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "HOUSESITS").unwrap();
        writeln!(output, "─────────").unwrap();
        for sit in &metrics.housesits {
            let title = sit.event.event.title.as_deref().unwrap_or("(untitled)");
            if sit.is_end_date {
                writeln!(output, "{title}  (ends today)").unwrap();
            } else {
                writeln!(output, "{title}").unwrap();
            }
        }
    }

    output
}

/// Runs the day command.
pub fn run<W: Write>(
    writer: &mut W,
    events: &[ClassifiedEvent],
    date: NaiveDate,
    config: &AnalyzerConfig,
    json: bool,
) -> Result<()> {
    let metrics = daily_metrics(events, date, config);

    if json {
        let report = DayMetrics { date, metrics };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_day(date, &metrics, config.include_travel))?;
    }
    Ok(())
}
