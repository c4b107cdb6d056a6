//! One academic year: date bounds, excluded dates and cross-day lookups.
//!
//! All lookback/lookahead across midnight goes through the weekday offset
//! tables below. A previous school day is 1-3 calendar days back (Monday looks
//! back to Friday), a next school day 1-3 days ahead (Friday looks ahead to
//! Monday). When the landing date is a holiday or inside a break the table is
//! applied again from there.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::calendar_data::YearDefinition;
use crate::extra_periods::ExtraPeriods;
use crate::period::{Period, PeriodKind};
use crate::schedule::{end_of_school_day, start_of_school_day, Schedule, SchoolDays};

/// Upper bound on holiday skipping, so a fully excluded year cannot loop forever
const MAX_SKIP_DAYS: usize = 366;

/// Calendar days back to the previous school day
pub fn previous_day_offset(day: Weekday) -> i64 {
    match day {
        Weekday::Sun => -2,
        Weekday::Mon => -3,
        Weekday::Tue => -1,
        Weekday::Wed => -1,
        Weekday::Thu => -1,
        Weekday::Fri => -1,
        Weekday::Sat => -1,
    }
}

/// Calendar days ahead to the next school day
pub fn next_day_offset(day: Weekday) -> i64 {
    match day {
        Weekday::Sun => 1,
        Weekday::Mon => 1,
        Weekday::Tue => 1,
        Weekday::Wed => 1,
        Weekday::Thu => 1,
        Weekday::Fri => 3,
        Weekday::Sat => 2,
    }
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Plain weekday tables, no holidays
#[derive(Debug, Clone, Copy, Default)]
pub struct Weekdays;

impl SchoolDays for Weekdays {
    fn previous_school_day(&self, date: NaiveDate) -> NaiveDate {
        date + Duration::days(previous_day_offset(date.weekday()))
    }

    fn next_school_day(&self, date: NaiveDate) -> NaiveDate {
        date + Duration::days(next_day_offset(date.weekday()))
    }
}

/// An academic year viewed through the caller's current extra-period settings
#[derive(Debug, Clone, Copy)]
pub struct Calendar<'a> {
    year: &'a YearDefinition,
    extras: &'a ExtraPeriods,
}

impl<'a> Calendar<'a> {
    pub fn new(year: &'a YearDefinition, extras: &'a ExtraPeriods) -> Self {
        Self { year, extras }
    }

    pub fn name(&self) -> &'a str {
        &self.year.name
    }

    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.year.is_excluded(date)
    }

    /// Weekday within the year's bounds that is not a holiday or break day
    pub fn is_school_day(&self, date: NaiveDate) -> bool {
        self.year.contains_date(date) && !is_weekend(date.weekday()) && !self.is_excluded(date)
    }

    pub fn first_school_day(&self) -> Option<NaiveDate> {
        self.year
            .start
            .iter_days()
            .take_while(|d| *d <= self.year.end)
            .find(|d| self.is_school_day(*d))
    }

    pub fn last_school_day(&self) -> Option<NaiveDate> {
        let mut date = self.year.end;
        while date >= self.year.start {
            if self.is_school_day(date) {
                return Some(date);
            }
            date = date.pred_opt()?;
        }
        None
    }

    /// First bell of the first school day
    pub fn start_of_year(&self) -> Option<NaiveDateTime> {
        self.first_school_day()
            .map(|d| start_of_school_day(d, self.extras))
    }

    /// Last bell of the last school day
    pub fn end_of_year(&self) -> Option<NaiveDateTime> {
        self.last_school_day().map(|d| end_of_school_day(d, self.extras))
    }

    /// Between the first and last bell of the year
    pub fn within_year(&self, t: NaiveDateTime) -> bool {
        match (self.start_of_year(), self.end_of_year()) {
            (Some(start), Some(end)) => start <= t && t <= end,
            _ => false,
        }
    }

    /// Within the year and not on an excluded date
    pub fn is_in_calendar(&self, t: NaiveDateTime) -> bool {
        self.within_year(t) && !self.is_excluded(t.date())
    }

    pub fn schedule(&self, t: NaiveDateTime) -> Option<&'static Schedule> {
        Schedule::for_weekday(t.weekday())
    }

    pub fn current_interval(&self, t: NaiveDateTime) -> Period {
        let date = t.date();

        if is_weekend(date.weekday()) {
            return Period::new(
                "Weekend!",
                PeriodKind::Weekend,
                end_of_school_day(self.previous_school_day(date), self.extras),
                start_of_school_day(self.next_school_day(date), self.extras),
            );
        }

        if self.is_excluded(date) {
            return Period::new(
                "No school",
                PeriodKind::DayOff,
                end_of_school_day(self.previous_school_day(date), self.extras),
                start_of_school_day(self.next_school_day(date), self.extras),
            );
        }

        match self.schedule(t) {
            Some(schedule) => schedule.current_interval(t, self.extras, self),
            None => Period::new("Weekend!", PeriodKind::Weekend, t, t),
        }
    }

    /// `t`'s date when it is a school day, otherwise the next school day.
    /// Before the year starts this is the first school day.
    pub fn current_or_next_day(&self, t: NaiveDateTime) -> NaiveDate {
        let date = t.date();
        if let Some(first) = self.first_school_day() {
            if date < first {
                return first;
            }
        }
        date.iter_days()
            .take_while(|d| *d <= self.year.end)
            .find(|d| self.is_school_day(*d))
            .unwrap_or_else(|| self.next_school_day(date))
    }

    /// Template periods for a school day, empty for anything else
    pub fn periods_for(&self, date: NaiveDate) -> Vec<Period> {
        match Schedule::for_weekday(date.weekday()) {
            Some(schedule) if self.is_school_day(date) => schedule.periods(date, self.extras),
            _ => Vec::new(),
        }
    }

    /// School days after today through the end of the year, plus today while
    /// today's last bell has not rung
    pub fn school_days_left(&self, t: NaiveDateTime) -> u32 {
        let today = t.date();
        let today_left =
            self.is_school_day(today) && t < end_of_school_day(today, self.extras);

        let later = today
            .iter_days()
            .skip(1)
            .take_while(|d| *d <= self.year.end)
            .filter(|d| self.is_school_day(*d))
            .count() as u32;

        later + u32::from(today_left)
    }
}

impl SchoolDays for Calendar<'_> {
    fn previous_school_day(&self, date: NaiveDate) -> NaiveDate {
        let mut day = Weekdays.previous_school_day(date);
        for _ in 0..MAX_SKIP_DAYS {
            if !self.is_excluded(day) {
                break;
            }
            day = Weekdays.previous_school_day(day);
        }
        day
    }

    fn next_school_day(&self, date: NaiveDate) -> NaiveDate {
        let mut day = Weekdays.next_school_day(date);
        for _ in 0..MAX_SKIP_DAYS {
            if !self.is_excluded(day) {
                break;
            }
            day = Weekdays.next_school_day(day);
        }
        day
    }
}



/// Kani formal verification proofs
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    fn offsets_skip_weekends() {
        let n: u8 = kani::any();
        kani::assume(n < 7);
        let day = Weekday::try_from(n).unwrap();
        let back = (day.num_days_from_monday() as i64 + previous_day_offset(day)).rem_euclid(7);
        let ahead = (day.num_days_from_monday() as i64 + next_day_offset(day)).rem_euclid(7);
        kani::assert(back < 5, "previous school day must be a weekday");
        kani::assert(ahead < 5, "next school day must be a weekday");
    }
}
