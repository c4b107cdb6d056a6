/// Countdown snapshot for one instant
/// Everything a display needs: interval name, time left in it, time left in the school day, days left in the year

use chrono::NaiveDateTime;
use std::fmt;

use crate::datetime::{countdown_between, hhmmss, timestring};
use crate::extra_periods::ExtraPeriods;
use crate::period::{Period, PeriodKind};
use crate::schedule::end_of_school_day;
use crate::selection::CalendarSet;

const NO_VALUE: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub time: NaiveDateTime,
    /// `None` when no calendar contains or follows `time`
    pub period: Option<Period>,
    /// Countdown to the end of the current interval
    pub left: String,
    pub elapsed: String,
    /// Time until today's last bell, "-" when school is over or not in session
    pub today: String,
    pub days_left: Option<u32>,
    pub progress: f64,
}

impl Status {
    pub fn at(set: &CalendarSet, extras: &ExtraPeriods, t: NaiveDateTime) -> Self {
        let period = set.resolve(t, extras);

        let year = set
            .calendars(extras)
            .find(|c| c.within_year(t))
            .or_else(|| set.next_calendar(t, extras));

        let today = match set.calendar(t, extras) {
            Some(calendar) if calendar.is_school_day(t.date()) => {
                let end = end_of_school_day(t.date(), extras);
                if end > t {
                    hhmmss(end - t)
                } else {
                    NO_VALUE.to_string()
                }
            }
            _ => NO_VALUE.to_string(),
        };

        let (left, elapsed, progress) = match &period {
            Some(p) => {
                let now = t.max(p.start).min(p.end);
                (
                    countdown_between(now, p.end),
                    countdown_between(p.start, now),
                    p.progress(t),
                )
            }
            None => (NO_VALUE.to_string(), NO_VALUE.to_string(), 0.0),
        };

        Self {
            time: t,
            period,
            left,
            elapsed,
            today,
            days_left: year.map(|c| c.school_days_left(t)),
            progress,
        }
    }

    pub fn name(&self) -> &str {
        self.period.as_ref().map_or("No schedule", |p| p.name.as_str())
    }

    pub fn kind(&self) -> Option<PeriodKind> {
        self.period.as_ref().map(|p| p.kind)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", timestring(self.time), self.name())?;
        if let Some(p) = &self.period {
            write!(f, " (until {})", timestring(p.end))?;
        }
        write!(f, " | left {} | today {}", self.left, self.today)?;
        match self.days_left {
            Some(days) => write!(f, " | {} school days left", days),
            None => Ok(()),
        }
    }
}
