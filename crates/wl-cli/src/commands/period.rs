//! Period command: the last N days against the N days before them.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use wl_core::{
    AnalyzerConfig, ClassifiedEvent, MetricComparison, PeriodComparison, period_comparison,
};

use super::util::{signed, trend_arrow};

/// An inclusive range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    /// The `days` days ending at `end`.
    pub fn ending(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// The window of the same length immediately before this one.
    pub fn preceding(&self, days: u32) -> Self {
        let end = self.start.pred_opt().unwrap_or(NaiveDate::MIN);
        Self::ending(end, days)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Comparison together with the windows it covers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub days: u32,
    pub current: Window,
    pub previous: Window,
    #[serde(flatten)]
    pub comparison: PeriodComparison,
}

/// Compares the `days` days ending at `end` with the window before.
///
/// Only countable work events are compared, bucketed by the day they start.
pub fn build_report(
    events: &[ClassifiedEvent],
    end: NaiveDate,
    days: u32,
    config: &AnalyzerConfig,
) -> PeriodReport {
    let current = Window::ending(end, days);
    let previous = current.preceding(days);

    let (mut this_period, mut last_period) = (Vec::new(), Vec::new());
    for event in events.iter().filter(|e| e.is_countable_work()) {
        let date = event.event.start.date();
        if current.contains(date) {
            this_period.push(event);
        } else if previous.contains(date) {
            last_period.push(event);
        }
    }
    tracing::debug!(
        current = this_period.len(),
        previous = last_period.len(),
        days,
        "bucketed events for period comparison"
    );

    PeriodReport {
        days,
        current,
        previous,
        comparison: period_comparison(&this_period, &last_period, days, days, config),
    }
}

fn metric_row(output: &mut String, label: &str, metric: &MetricComparison, precision: usize) {
    let mut change = format!(
        "{} {}",
        signed(metric.diff, precision),
        trend_arrow(metric.trend)
    );
    if metric.previous > 0.0 {
        write!(change, " ({}%)", signed(metric.percent, 0)).unwrap();
    }
    writeln!(
        output,
        "{label:<14}{:>9.precision$}  {:>9.precision$}  {change}",
        metric.current, metric.previous
    )
    .unwrap();
}

/// Formats the human-readable period comparison.
pub fn format_period(report: &PeriodReport) -> String {
    let mut output = String::new();
    let range = |w: &Window| format!("{} to {}", w.start.format("%b %-d"), w.end.format("%b %-d, %Y"));

    writeln!(output, "LAST {} DAYS: {}", report.days, range(&report.current)).unwrap();
    writeln!(output, "Previous:     {}", range(&report.previous)).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "{:<14}{:>9}  {:>9}  Change", "", "Current", "Previous").unwrap();
    metric_row(&mut output, "Appointments:", &report.comparison.appointments, 0);
    metric_row(&mut output, "Hours:", &report.comparison.total_hours, 1);
    metric_row(&mut output, "Hours/day:", &report.comparison.avg_hours_per_day, 2);

    output
}

/// Runs the period command.
pub fn run<W: Write>(
    writer: &mut W,
    events: &[ClassifiedEvent],
    end: NaiveDate,
    days: u32,
    config: &AnalyzerConfig,
    json: bool,
) -> Result<()> {
    let report = build_report(events, end, days, config);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_period(&report))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use wl_core::{CalendarEvent, EventId, Trend, classify_all};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn ts(d: u32, h: u32) -> NaiveDateTime {
        date(d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn visit(id: &str, title: &str, d: u32, h: u32, hours: u32) -> CalendarEvent {
        CalendarEvent::new(EventId::new(id).unwrap(), title, ts(d, h), ts(d, h + hours))
    }

    fn sample_events() -> Vec<ClassifiedEvent> {
        let mut hidden = visit("hidden", "Rex - 60", 9, 9, 1);
        hidden.ignored = true;
        classify_all(&[
            // Previous window (Mar 1 to Mar 3)
            visit("a", "Rex - 60", 2, 9, 1),
            // Current window (Mar 4 to Mar 6)
            visit("b", "Rex - 60", 4, 9, 1),
            visit("c", "Luna - 60", 5, 9, 2),
            visit("d", "Pip - 60", 6, 9, 3),
            // Not work
            visit("e", "Dentist", 5, 14, 1),
            // Outside both windows
            visit("f", "Rex - 60", 7, 9, 1),
            hidden,
        ])
    }

    #[test]
    fn windows_are_adjacent_and_inclusive() {
        let current = Window::ending(date(10), 7);
        assert_eq!(current, Window { start: date(4), end: date(10) });
        let previous = current.preceding(7);
        assert_eq!(
            previous,
            Window {
                start: NaiveDate::from_ymd_opt(2025, 2, 25).unwrap(),
                end: date(3),
            }
        );
        assert!(current.contains(date(4)));
        assert!(current.contains(date(10)));
        assert!(!current.contains(date(3)));
    }

    #[test]
    fn single_day_window() {
        let current = Window::ending(date(10), 1);
        assert_eq!(current.start, current.end);
        assert_eq!(current.preceding(1).end, date(9));
    }

    #[test]
    fn report_buckets_countable_work_by_start_date() {
        let report = build_report(&sample_events(), date(6), 3, &AnalyzerConfig::default());
        let c = &report.comparison;

        assert!((c.appointments.current - 3.0).abs() < f64::EPSILON);
        assert!((c.appointments.previous - 1.0).abs() < f64::EPSILON);
        assert_eq!(c.appointments.trend, Trend::Positive);

        assert!((c.total_hours.current - 6.0).abs() < 1e-9);
        assert!((c.total_hours.previous - 1.0).abs() < 1e-9);
        assert!((c.total_hours.percent - 500.0).abs() < 1e-9);

        assert!((c.avg_hours_per_day.current - 2.0).abs() < 1e-9);
        assert_eq!(c.avg_hours_per_day.trend, Trend::Positive);
    }

    #[test]
    fn text_report_lists_each_metric() {
        let report = build_report(&sample_events(), date(6), 3, &AnalyzerConfig::default());
        let output = format_period(&report);

        assert!(output.starts_with("LAST 3 DAYS: Mar 4 to Mar 6, 2025\n"));
        assert!(output.contains("Previous:     Mar 1 to Mar 3, 2025\n"));
        assert!(output.contains("Appointments:         3          1  +2 ↑ (+200%)\n"));
        assert!(output.contains("Hours:              6.0        1.0  +5.0 ↑ (+500%)\n"));
        assert!(output.contains("Hours/day:         2.00       0.33  +1.67 ↑ (+500%)\n"));
    }

    #[test]
    fn empty_previous_period_has_no_percent() {
        let events = classify_all(&[visit("b", "Rex - 60", 4, 9, 1)]);
        let report = build_report(&events, date(6), 3, &AnalyzerConfig::default());
        let output = format_period(&report);
        assert!(output.contains("Hours:              1.0        0.0  +1.0 →\n"));
    }

    #[test]
    fn json_report_includes_windows() {
        let mut out = Vec::new();
        run(&mut out, &sample_events(), date(6), 3, &AnalyzerConfig::default(), true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["days"], 3);
        assert_eq!(value["current"]["start"], "2025-03-04");
        assert_eq!(value["previous"]["end"], "2025-03-03");
        assert_eq!(value["appointments"]["current"], 3.0);
        assert_eq!(value["totalHours"]["trend"], "positive");
    }
}
