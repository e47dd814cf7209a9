//! Calendar windows used to scope dashboard queries.
//!
//! Windows are computed on the reporting timezone's local calendar and then
//! expressed as UTC instants, so database filters stay plain `TIMESTAMPTZ`
//! comparisons.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Half-open `[start, end)` interval of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// The three windows the dashboard reports on, anchored at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingWindows {
    pub now: DateTime<Utc>,
    /// First instant of the current month up to `now`.
    pub current_month: TimeWindow,
    /// The whole previous calendar month.
    pub previous_month: TimeWindow,
    /// The local calendar day containing `now`.
    pub today: TimeWindow,
}

impl ReportingWindows {
    pub fn at(now: DateTime<Utc>, tz: Tz) -> Self {
        let local_today = now.with_timezone(&tz).date_naive();
        let month_start = first_of_month(local_today);
        let previous_month_start = first_of_month(month_start - Duration::days(1));

        let day_start = start_of_local_day(local_today, tz);
        let next_day_start = start_of_local_day(local_today + Duration::days(1), tz);
        let current_month_start = start_of_local_day(month_start, tz);

        Self {
            now,
            current_month: TimeWindow::new(current_month_start, now),
            previous_month: TimeWindow::new(
                start_of_local_day(previous_month_start, tz),
                current_month_start,
            ),
            today: TimeWindow::new(day_start, next_day_start),
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// First instant of a local calendar day.
pub fn start_of_local_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    // A DST gap can swallow local midnight; the day then starts when the gap ends.
    (0..=2)
        .find_map(|hours| {
            tz.from_local_datetime(&(midnight + Duration::hours(hours)))
                .earliest()
        })
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}
