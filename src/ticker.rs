/// Once-per-second tick loop, aligned to the wall-clock second boundary

use chrono::{NaiveDateTime, Timelike};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::clock::Clock;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Time until the next whole second. Exactly on a boundary waits a full second.
pub fn time_until_next_tick_at(now: NaiveDateTime) -> Duration {
    // nanosecond() exceeds 1e9 during a leap second
    let nanos = now.nanosecond() % NANOS_PER_SECOND;
    Duration::from_nanos(u64::from(NANOS_PER_SECOND - nanos))
}

/// Call `on_tick` with the clock's reading after every second boundary until cancelled
pub async fn run_ticker<C, F>(clock: &C, cancel: CancellationToken, mut on_tick: F)
where
    C: Clock + ?Sized,
    F: FnMut(NaiveDateTime),
{
    info!("Ticker started");

    loop {
        let wait = time_until_next_tick_at(clock.now());
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Ticker stopped");
                return;
            }
            _ = sleep(wait) => {}
        }

        let now = clock.now();
        debug!("Tick at {}", now);
        on_tick(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn at_millis(ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 2)
            .unwrap()
            .and_hms_milli_opt(7, 0, 0, ms)
            .unwrap()
    }

    #[test]
    fn test_time_until_next_tick() {
        assert_eq!(time_until_next_tick_at(at_millis(0)), Duration::from_secs(1));
        assert_eq!(time_until_next_tick_at(at_millis(250)), Duration::from_millis(750));
        assert_eq!(time_until_next_tick_at(at_millis(999)), Duration::from_millis(1));
    }

    #[test]
    fn test_time_until_next_tick_leap_second() {
        let leap = NaiveDate::from_ymd_opt(2016, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 1500)
            .unwrap();
        assert_eq!(time_until_next_tick_at(leap), Duration::from_millis(500));
    }

    #[test]
    fn test_ticker_stops_when_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut ticks = 0;
        tokio_test::block_on(run_ticker(&FixedClock(at_millis(0)), cancel, |_| ticks += 1));
        assert_eq!(ticks, 0);
    }

    #[test]
    fn test_ticker_passes_clock_reading() {
        let cancel = CancellationToken::new();
        let stop = cancel.clone();
        let mut seen = Vec::new();
        tokio_test::block_on(run_ticker(&FixedClock(at_millis(999)), cancel, |now| {
            seen.push(now);
            if seen.len() == 3 {
                stop.cancel();
            }
        }));
        assert_eq!(seen, vec![at_millis(999); 3]);
    }
}
