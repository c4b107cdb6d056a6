//! Clock abstraction so the resolver can be driven by a fixed or shifted time.
//!
//! Production code uses [`SystemClock`]. Tests and the `--at` flag use
//! [`FixedClock`]; `BELLCHECK_CLOCK_OFFSET_SECS` wraps the system clock in an
//! [`OffsetClock`]; [`SteppedClock`] advances by a fixed step on every reading.

use chrono::{Duration, Local, NaiveDateTime};
use std::sync::Mutex;

/// Source of the current local instant
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Another clock shifted by a constant offset
#[derive(Debug, Clone, Copy)]
pub struct OffsetClock<C> {
    inner: C,
    offset: Duration,
}

impl<C: Clock> OffsetClock<C> {
    pub fn new(inner: C, offset: Duration) -> Self {
        Self { inner, offset }
    }
}

impl<C: Clock> Clock for OffsetClock<C> {
    fn now(&self) -> NaiveDateTime {
        self.inner.now() + self.offset
    }
}

/// Returns `start`, then `start + step`, `start + 2 * step`, ...
#[derive(Debug)]
pub struct SteppedClock {
    current: Mutex<NaiveDateTime>,
    step: Duration,
}

impl SteppedClock {
    pub fn new(start: NaiveDateTime, step: Duration) -> Self {
        Self {
            current: Mutex::new(start),
            step,
        }
    }
}

impl Clock for SteppedClock {
    fn now(&self) -> NaiveDateTime {
        let mut guard = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = *guard;
        *guard = now + self.step;
        now
    }
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS"
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))
}
