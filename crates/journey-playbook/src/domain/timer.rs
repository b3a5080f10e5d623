//! Node timers and relative time labels.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use journey_core::clock::Clock;

use super::model::Timer;

/// Returns the date a timer runs out, or `None` if `start_on` is not a
/// `YYYY-MM-DD` date or an RFC 3339 timestamp.
#[must_use]
pub fn timer_deadline(timer: &Timer) -> Option<NaiveDate> {
    let start = NaiveDate::parse_from_str(&timer.start_on, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(&timer.start_on)
                .ok()
                .map(|dt| dt.date_naive())
        })?;
    start.checked_add_signed(TimeDelta::try_days(timer.duration_days)?)
}

/// Whole days left until the deadline; negative once overdue.
#[must_use]
pub fn days_remaining(timer: &Timer, clock: &dyn Clock) -> Option<i64> {
    timer_deadline(timer).map(|deadline| (deadline - clock.today()).num_days())
}

/// Short relative label for a past instant ("5 min ago", "Yesterday", ...).
/// Anything a week or older is shown as a short date such as `3 Jan`.
#[must_use]
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "Just now".to_owned()
    } else if minutes < 60 {
        format!("{minutes} min ago")
    } else if hours < 24 {
        format!("{hours} h ago")
    } else if days == 1 {
        "Yesterday".to_owned()
    } else if days < 7 {
        format!("{days} d ago")
    } else {
        then.format("%-d %b").to_string()
    }
}
