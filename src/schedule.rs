//! Bell schedules and "current interval" resolution within a school day.
//!
//! Two fixed variants exist: [`NORMAL`] with nine slots (Period 0 through
//! Period 7 plus Lunch) and [`LATE_START`] with eight (no Period 0). Which
//! slots are observed on a given date depends on that weekday's
//! [`DayExtras`]: Period 0 only when `zero` is set, Period 7 only when
//! `seventh` is set.
//!
//! Resolution never looks at other dates directly. Before-school and
//! after-school spans reach into the neighbouring school days through the
//! [`SchoolDays`] trait, which the calendar implements.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::datetime::to_instant;
use crate::extra_periods::{DayExtras, ExtraPeriods};
use crate::period::{Period, PeriodKind};

/// A named slot in a schedule template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Zero,
    One,
    Two,
    Three,
    Lunch,
    Four,
    Five,
    Six,
    Seven,
}

impl Slot {
    pub fn label(self) -> &'static str {
        match self {
            Slot::Zero => "Period 0",
            Slot::One => "Period 1",
            Slot::Two => "Period 2",
            Slot::Three => "Period 3",
            Slot::Lunch => "Lunch",
            Slot::Four => "Period 4",
            Slot::Five => "Period 5",
            Slot::Six => "Period 6",
            Slot::Seven => "Period 7",
        }
    }

    fn kind(self) -> PeriodKind {
        match self {
            Slot::Lunch => PeriodKind::Lunch,
            _ => PeriodKind::Class,
        }
    }
}

/// Wall-clock bell time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BellTime {
    pub hour: u8,
    pub minute: u8,
}

impl BellTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// This bell on the given date, seconds zeroed
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        to_instant(u32::from(self.hour), u32::from(self.minute), date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTemplate {
    pub slot: Slot,
    pub start: BellTime,
    pub end: BellTime,
}

const fn slot(slot: Slot, start: (u8, u8), end: (u8, u8)) -> SlotTemplate {
    SlotTemplate {
        slot,
        start: BellTime::new(start.0, start.1),
        end: BellTime::new(end.0, end.1),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Normal,
    LateStart,
}

/// An ordered set of slot templates for one weekday variant
#[derive(Debug, PartialEq, Eq)]
pub struct Schedule {
    pub variant: Variant,
    pub slots: &'static [SlotTemplate],
}

pub static NORMAL: Schedule = Schedule {
    variant: Variant::Normal,
    slots: &[
        slot(Slot::Zero, (7, 23), (8, 21)),
        slot(Slot::One, (8, 27), (9, 25)),
        slot(Slot::Two, (9, 31), (10, 34)),
        slot(Slot::Three, (10, 40), (11, 38)),
        slot(Slot::Lunch, (11, 38), (12, 18)),
        slot(Slot::Four, (12, 24), (13, 22)),
        slot(Slot::Five, (13, 28), (14, 26)),
        slot(Slot::Six, (14, 32), (15, 30)),
        slot(Slot::Seven, (15, 36), (16, 34)),
    ],
};

pub static LATE_START: Schedule = Schedule {
    variant: Variant::LateStart,
    slots: &[
        slot(Slot::One, (9, 57), (10, 40)),
        slot(Slot::Two, (10, 46), (11, 34)),
        slot(Slot::Three, (11, 40), (12, 23)),
        slot(Slot::Lunch, (12, 23), (13, 3)),
        slot(Slot::Four, (13, 9), (13, 52)),
        slot(Slot::Five, (13, 58), (14, 41)),
        slot(Slot::Six, (14, 47), (15, 30)),
        slot(Slot::Seven, (15, 36), (16, 19)),
    ],
};

/// Lookup of the neighbouring school days, used for spans that cross midnight
pub trait SchoolDays {
    fn previous_school_day(&self, date: NaiveDate) -> NaiveDate;
    fn next_school_day(&self, date: NaiveDate) -> NaiveDate;
}

impl Schedule {
    /// Monday is late start; weekends have no schedule
    pub fn for_weekday(day: Weekday) -> Option<&'static Schedule> {
        match day {
            Weekday::Mon => Some(&LATE_START),
            Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => Some(&NORMAL),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    fn first_index(&self, extras: DayExtras) -> usize {
        match self.slots.first() {
            Some(t) if t.slot == Slot::Zero && !extras.zero => 1,
            _ => 0,
        }
    }

    fn last_index(&self, extras: DayExtras) -> usize {
        let last = self.slots.len().saturating_sub(1);
        match self.slots.last() {
            Some(t) if t.slot == Slot::Seven && !extras.seventh => last.saturating_sub(1),
            _ => last,
        }
    }

    /// Index of the first observed slot on `date`
    pub fn first_period(&self, date: NaiveDate, extras: &ExtraPeriods) -> usize {
        self.first_index(extras.get(date.weekday()))
    }

    /// Index of the last observed slot on `date`
    pub fn last_period(&self, date: NaiveDate, extras: &ExtraPeriods) -> usize {
        self.last_index(extras.get(date.weekday()))
    }

    pub fn start_of_day(&self, date: NaiveDate, extras: &ExtraPeriods) -> NaiveDateTime {
        self.slots[self.first_period(date, extras)].start.on(date)
    }

    pub fn end_of_day(&self, date: NaiveDate, extras: &ExtraPeriods) -> NaiveDateTime {
        self.slots[self.last_period(date, extras)].end.on(date)
    }

    fn period_at(&self, index: usize, date: NaiveDate) -> Period {
        let template = &self.slots[index];
        Period::new(
            template.slot.label(),
            template.slot.kind(),
            template.start.on(date),
            template.end.on(date),
        )
    }

    /// Period `index` with the rest of the day chained behind it
    fn linked(&self, index: usize, last: usize, date: NaiveDate) -> Period {
        (index..=last)
            .rev()
            .fold(None, |next, i| Some(self.period_at(i, date).with_next(next)))
            .unwrap_or_else(|| self.period_at(index, date))
    }

    /// Every observed template period on `date`, in order
    pub fn periods(&self, date: NaiveDate, extras: &ExtraPeriods) -> Vec<Period> {
        let first = self.first_period(date, extras);
        let last = self.last_period(date, extras);
        (first..=last).map(|i| self.linked(i, last, date)).collect()
    }

    /// Resolve the interval containing `t` on `t`'s date
    pub fn current_interval(
        &self,
        t: NaiveDateTime,
        extras: &ExtraPeriods,
        days: &impl SchoolDays,
    ) -> Period {
        let date = t.date();
        let first = self.first_period(date, extras);
        let last = self.last_period(date, extras);

        let mut current = self.period_at(first, date);
        if t < current.start {
            let start = end_of_school_day(days.previous_school_day(date), extras);
            return Period::new("Before school", PeriodKind::BeforeSchool, start, current.start)
                .with_next(Some(self.linked(first, last, date)));
        }

        for i in first..last {
            if current.contains(t) {
                return self.linked(i, last, date);
            }
            let next = self.period_at(i + 1, date);
            if t <= next.start {
                return Period::new("Passing period", PeriodKind::Passing, current.end, next.start)
                    .with_next(Some(self.linked(i + 1, last, date)));
            }
            current = next;
        }

        if current.contains(t) {
            return self.linked(last, last, date);
        }

        let end = start_of_school_day(days.next_school_day(date), extras);
        Period::new("After school", PeriodKind::AfterSchool, current.end, end)
    }
}

/// First bell on `date`, or midnight when the date has no schedule
pub fn start_of_school_day(date: NaiveDate, extras: &ExtraPeriods) -> NaiveDateTime {
    match Schedule::for_weekday(date.weekday()) {
        Some(schedule) => schedule.start_of_day(date, extras),
        None => NaiveDateTime::new(date, NaiveTime::MIN),
    }
}

/// Last bell on `date`, or midnight when the date has no schedule
pub fn end_of_school_day(date: NaiveDate, extras: &ExtraPeriods) -> NaiveDateTime {
    match Schedule::for_weekday(date.weekday()) {
        Some(schedule) => schedule.end_of_day(date, extras),
        None => NaiveDateTime::new(date, NaiveTime::MIN),
    }
}
