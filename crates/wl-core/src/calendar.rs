//! Day windows: which events touch a day, and for how long.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::event::{CalendarEvent, ClassifiedEvent};

/// Minutes in a calendar day; the ceiling for any clipped duration.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Anything with a wall-clock start and end.
///
/// Lets day arithmetic work on raw and classified events alike.
pub trait Scheduled {
    fn start(&self) -> NaiveDateTime;
    fn end(&self) -> NaiveDateTime;
}

impl<T: Scheduled + ?Sized> Scheduled for &T {
    fn start(&self) -> NaiveDateTime {
        (**self).start()
    }

    fn end(&self) -> NaiveDateTime {
        (**self).end()
    }
}

impl Scheduled for CalendarEvent {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

impl Scheduled for ClassifiedEvent {
    fn start(&self) -> NaiveDateTime {
        self.event.start
    }

    fn end(&self) -> NaiveDateTime {
        self.event.end
    }
}

/// Optional narrowing applied by [`events_on_day`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayFilter {
    pub exclude_all_day: bool,
    pub exclude_ignored: bool,
    pub work_only: bool,
}

impl DayFilter {
    /// Every overlapping event.
    pub const ANY: Self = Self {
        exclude_all_day: false,
        exclude_ignored: false,
        work_only: false,
    };

    /// Timed, visible work events: what counts toward workload.
    pub const WORKLOAD: Self = Self {
        exclude_all_day: true,
        exclude_ignored: true,
        work_only: true,
    };

    fn admits(self, event: &ClassifiedEvent) -> bool {
        !(self.exclude_all_day && event.event.is_all_day
            || self.exclude_ignored && event.event.ignored
            || self.work_only && !event.is_work_event)
    }
}

/// First instant of the day.
pub fn day_start(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// Last instant of the day (inclusive bound).
pub fn day_end(day: NaiveDate) -> NaiveDateTime {
    next_midnight(day) - TimeDelta::milliseconds(1)
}

fn next_midnight(day: NaiveDate) -> NaiveDateTime {
    day.succ_opt()
        .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN))
}

/// Whether the event's span intersects `[day_start, day_end]`.
///
/// Covers events starting, ending, or running through the day.
pub fn overlaps_day<E: Scheduled>(event: &E, day: NaiveDate) -> bool {
    event.start() <= day_end(day) && event.end() >= day_start(day)
}

/// Events overlapping `day` that pass `filter`, in input order.
pub fn events_on_day(
    events: &[ClassifiedEvent],
    day: NaiveDate,
    filter: DayFilter,
) -> Vec<&ClassifiedEvent> {
    events
        .iter()
        .filter(|e| filter.admits(e) && overlaps_day(*e, day))
        .collect()
}

/// Whole minutes of the event that fall within `day`.
///
/// Always in `[0, 1440]`; an inverted interval yields 0.
pub fn duration_for_day<E: Scheduled>(event: &E, day: NaiveDate) -> i64 {
    let start = event.start().max(day_start(day));
    let end = event.end().min(next_midnight(day));
    if end <= start {
        return 0;
    }
    (end - start).num_minutes().clamp(0, MINUTES_PER_DAY)
}

/// Unclipped length in hours; inverted intervals count as zero.
#[allow(clippy::cast_precision_loss)]
pub fn raw_hours<E: Scheduled>(event: &E) -> f64 {
    let seconds = (event.end() - event.start()).num_seconds().max(0);
    seconds as f64 / 3600.0
}

/// The `count` consecutive days beginning at `start`.
pub fn days_from(start: NaiveDate, count: usize) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(count)
}
