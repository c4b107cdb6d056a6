//! Resolved bell-schedule intervals.
//!
//! A [`Period`] is what the resolver hands back for "what is happening right
//! now": a named closed interval plus a classification that the display layer
//! uses for coloring and for deciding which countdowns to show.

use chrono::{Duration, NaiveDateTime};

/// What kind of interval a [`Period`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    /// A numbered class period from the schedule template
    Class,
    /// Lunch, also a template slot
    Lunch,
    /// Gap between two template slots on the same day
    Passing,
    BeforeSchool,
    AfterSchool,
    Weekend,
    /// Excluded date (holiday or break) inside the school year
    DayOff,
    /// Gap between two academic years
    Summer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub name: String,
    pub kind: PeriodKind,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Next template period later the same school day, if any
    pub next: Option<Box<Period>>,
}

impl Period {
    pub fn new(
        name: impl Into<String>,
        kind: PeriodKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            start,
            end,
            next: None,
        }
    }

    pub fn with_next(mut self, next: Option<Period>) -> Self {
        self.next = next.map(Box::new);
        self
    }

    /// Closed containment: the boundary instant belongs to the period that is ending
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }

    pub fn is_passing_period(&self) -> bool {
        self.kind == PeriodKind::Passing
    }

    /// Class, lunch and passing periods all count as school hours
    pub fn during_school(&self) -> bool {
        matches!(
            self.kind,
            PeriodKind::Class | PeriodKind::Lunch | PeriodKind::Passing
        )
    }

    /// True for periods that come from a schedule template slot
    pub fn is_class(&self) -> bool {
        matches!(self.kind, PeriodKind::Class | PeriodKind::Lunch)
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    pub fn elapsed(&self, t: NaiveDateTime) -> Duration {
        (t - self.start).clamp(Duration::zero(), self.length().max(Duration::zero()))
    }

    pub fn remaining(&self, t: NaiveDateTime) -> Duration {
        (self.end - t).clamp(Duration::zero(), self.length().max(Duration::zero()))
    }

    /// Elapsed fraction in [0, 1], for progress bars
    pub fn progress(&self, t: NaiveDateTime) -> f64 {
        let total = self.length().num_milliseconds();
        if total <= 0 {
            return 1.0;
        }
        self.elapsed(t).num_milliseconds() as f64 / total as f64
    }
}
