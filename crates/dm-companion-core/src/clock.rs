//! Time source for creation and event timestamps.

use chrono::{DateTime, Utc};

/// Supplies `created_at` for characters and encounters and `occurred_at` for
/// events, so handlers can be tested at a fixed instant.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used by the server binary.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
