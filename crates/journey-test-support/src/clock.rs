//! Deterministic `Clock` implementation for tests.

use chrono::{DateTime, TimeZone, Utc};
use journey_core::clock::Clock;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The instant shared by tests that do not care about the exact time:
/// 2026-09-20 10:00 UTC.
///
/// # Panics
///
/// Never; the timestamp is a valid constant.
#[must_use]
pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2026, 9, 20, 10, 0, 0).unwrap())
}
