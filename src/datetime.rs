/// Formatting and arithmetic helpers for countdown display
/// All duration helpers clamp negative input to zero instead of printing "-00:01:00"

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// A duration decomposed into whole days, hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

fn whole_seconds(d: Duration) -> i64 {
    d.num_seconds().max(0)
}

/// Format the time of day as zero-padded HH:MM
pub fn timestring(t: NaiveDateTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// Format a duration as zero-padded HH:MM:SS, hours unbounded
pub fn hhmmss(d: Duration) -> String {
    let seconds = whole_seconds(d);
    let minutes = seconds / 60;
    format!("{:02}:{:02}:{:02}", minutes / 60, minutes % 60, seconds % 60)
}

/// Decompose a duration into days, hours, minutes and seconds
pub fn ddhhmmss(d: Duration) -> Breakdown {
    let seconds = whole_seconds(d);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    Breakdown {
        days: hours / 24,
        hours: hours % 24,
        minutes: minutes % 60,
        seconds: seconds % 60,
    }
}

/// Whole hours from `a` to `b` (negative when `b` precedes `a`)
pub fn hours_between(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    (b - a).num_hours()
}

/// Countdown text: HH:MM:SS under a day, "N days, HH:MM:SS" otherwise
pub fn countdown(d: Duration) -> String {
    let parts = ddhhmmss(d);
    if parts.days == 0 {
        return hhmmss(d);
    }
    let unit = if parts.days == 1 { "day" } else { "days" };
    format!(
        "{} {}, {:02}:{:02}:{:02}",
        parts.days, unit, parts.hours, parts.minutes, parts.seconds
    )
}

/// Countdown text from `a` to `b`: HH:MM:SS while under 24 hours apart, days form beyond
pub fn countdown_between(a: NaiveDateTime, b: NaiveDateTime) -> String {
    if hours_between(a, b) < 24 {
        hhmmss(b - a)
    } else {
        countdown(b - a)
    }
}

/// Parse HH:MM:SS back into a duration. Hours may exceed 23.
pub fn parse_hhmmss(s: &str) -> Option<Duration> {
    let mut fields = s.trim().split(':');
    let hours: i64 = fields.next()?.parse().ok()?;
    let minutes: i64 = fields.next()?.parse().ok()?;
    let seconds: i64 = fields.next()?.parse().ok()?;
    if fields.next().is_some()
        || hours < 0
        || !(0..60).contains(&minutes)
        || !(0..60).contains(&seconds)
    {
        return None;
    }
    Some(Duration::seconds(hours * 3600 + minutes * 60 + seconds))
}

/// Combine an HH:MM bell time with a calendar date, seconds zeroed
pub fn to_instant(hour: u32, minute: u32, date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(hour) * 60 + i64::from(minute))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// hhmmss then parse_hhmmss recovers the duration to the second
        #[test]
        fn hhmmss_round_trips(millis in 0i64..1_000_000_000i64) {
            let d = Duration::milliseconds(millis);
            let parsed = parse_hhmmss(&hhmmss(d)).unwrap();
            prop_assert_eq!(parsed.num_seconds(), d.num_seconds());
        }

        /// Breakdown reassembles into the floored duration
        #[test]
        fn breakdown_reassembles(secs in 0i64..100_000_000i64) {
            let b = ddhhmmss(Duration::seconds(secs));
            prop_assert!(b.hours < 24 && b.minutes < 60 && b.seconds < 60);
            prop_assert_eq!(b.days * 86_400 + b.hours * 3600 + b.minutes * 60 + b.seconds, secs);
        }

        /// Formatting never shows a minus sign
        #[test]
        fn never_negative_looking(secs in -1_000_000i64..1_000_000i64) {
            prop_assert!(!hhmmss(Duration::seconds(secs)).contains('-'));
            prop_assert!(!countdown(Duration::seconds(secs)).contains('-'));
        }
    }
}
