//! Shared test doubles and fixtures for the PhD journey tracker.

mod clock;
pub mod fixtures;

pub use clock::{FixedClock, fixed_clock};
