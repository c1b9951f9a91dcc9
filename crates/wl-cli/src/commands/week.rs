//! Week command: seven days of workload with totals.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use wl_core::{AnalyzerConfig, ClassifiedEvent, LevelThresholds, WeeklyStats, weekly_stats};

use super::util::{format_duration, format_hours, progress_bar};

/// Formats the human-readable week report.
///
/// Bars are scaled so a full bar means the burnout threshold.
#[allow(clippy::cast_possible_truncation)]
pub fn format_week(stats: &WeeklyStats, thresholds: &LevelThresholds) -> String {
    let mut output = String::new();
    let bar_max = (thresholds.burnout * 60.0).round() as i64;

    writeln!(output, "WEEK OF {}", stats.week_start.format("%b %-d, %Y")).unwrap();
    writeln!(output).unwrap();

    for day in &stats.days {
        let m = &day.metrics;
        let mut line = format!(
            "{}  {:>7}  {}  {}",
            day.date.format("%a %b %d"),
            format_duration(m.total_minutes),
            progress_bar(m.total_minutes, bar_max),
            m.label
        );
        match m.housesits.len() {
            0 => {}
            1 => line.push_str("  [1 housesit]"),
            n => write!(line, "  [{n} housesits]").unwrap(),
        }
        writeln!(output, "{line}").unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "SUMMARY").unwrap();
    writeln!(output, "───────").unwrap();
    writeln!(output, "Total:        {}", format_duration(stats.total_minutes)).unwrap();
    writeln!(output, "  Visits:     {}", format_duration(stats.total_work_minutes)).unwrap();
    writeln!(output, "  Travel:     {}", format_duration(stats.total_travel_minutes)).unwrap();
    writeln!(output, "Appointments: {}", stats.total_work_events).unwrap();
    writeln!(output, "Days worked:  {}", stats.days_with_work).unwrap();
    writeln!(output, "Avg per day:  {}", format_hours(stats.avg_hours_per_day)).unwrap();

    output
}

/// Runs the week command.
pub fn run<W: Write>(
    writer: &mut W,
    events: &[ClassifiedEvent],
    week_start: NaiveDate,
    config: &AnalyzerConfig,
    json: bool,
) -> Result<()> {
    let stats = weekly_stats(events, week_start, config);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&stats)?)?;
    } else {
        write!(writer, "{}", format_week(&stats, &config.thresholds))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use insta::assert_snapshot;
    use wl_core::{CalendarEvent, EventId, classify_all};

    fn ts(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn visit(id: &str, title: &str, d: u32, h: u32, minutes: i64) -> CalendarEvent {
        let start = ts(d, h, 0);
        CalendarEvent::new(
            EventId::new(id).unwrap(),
            title,
            start,
            start + chrono::TimeDelta::minutes(minutes),
        )
    }

    #[test]
    fn test_week_report() {
        let mut events = vec![
            visit("a", "Rex - 60", 10, 9, 60).with_location("Elm St"),
            visit("b", "Luna - 30", 10, 11, 30).with_location("Oak Ave"),
            visit("c", "Pip - 45", 12, 8, 45),
            CalendarEvent::new(EventId::new("hs").unwrap(), "Miso HS", ts(13, 19, 0), ts(15, 9, 0)),
        ];
        for i in 0..12 {
            events.push(visit(&format!("long{i}"), "Rex - 60", 14, 6 + i, 60));
        }
        let events = classify_all(&events);
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let config = AnalyzerConfig::default();
        let stats = weekly_stats(&events, start, &config);

        assert_snapshot!(format_week(&stats, &config.thresholds), @r"
        WEEK OF Mar 10, 2025

        Mon Mar 10   2h 15m  ██░░░░░░░░  Light
        Tue Mar 11       0m  ░░░░░░░░░░  No Work
        Wed Mar 12      45m  █░░░░░░░░░  Light
        Thu Mar 13       0m  ░░░░░░░░░░  No Work  [1 housesit]
        Fri Mar 14   12h 0m  ██████████  Burnout Risk  [1 housesit]
        Sat Mar 15       0m  ░░░░░░░░░░  No Work  [1 housesit]
        Sun Mar 16       0m  ░░░░░░░░░░  No Work

        SUMMARY
        ───────
        Total:        15h 0m
          Visits:     14h 15m
          Travel:     45m
        Appointments: 15
        Days worked:  3
        Avg per day:  5h 0m
        ");
    }

    #[test]
    fn test_week_json_has_seven_days() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut out = Vec::new();
        run(&mut out, &[], start, &AnalyzerConfig::default(), true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["weekStart"], "2025-03-10");
        assert_eq!(value["days"].as_array().unwrap().len(), 7);
        assert_eq!(value["daysWithWork"], 0);
        assert_eq!(value["avgHoursPerDay"], 0.0);
    }
}
