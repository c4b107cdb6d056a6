/// Picking the academic year for an instant, and the summer gap between years
/// Years are checked in the order they were supplied; the first match wins

use chrono::NaiveDateTime;
use tracing::debug;

use crate::calendar::Calendar;
use crate::calendar_data::YearDefinition;
use crate::extra_periods::ExtraPeriods;
use crate::period::{Period, PeriodKind};

#[derive(Debug, Clone, Default)]
pub struct CalendarSet {
    years: Vec<YearDefinition>,
}

impl CalendarSet {
    pub fn new(years: Vec<YearDefinition>) -> Self {
        Self { years }
    }

    pub fn years(&self) -> &[YearDefinition] {
        &self.years
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Every year, viewed with the given extra periods
    pub fn calendars<'a>(
        &'a self,
        extras: &'a ExtraPeriods,
    ) -> impl Iterator<Item = Calendar<'a>> + 'a {
        self.years.iter().map(move |year| Calendar::new(year, extras))
    }

    /// The year containing `t`, if any
    pub fn calendar<'a>(
        &'a self,
        t: NaiveDateTime,
        extras: &'a ExtraPeriods,
    ) -> Option<Calendar<'a>> {
        self.calendars(extras).find(|c| c.is_in_calendar(t))
    }

    /// The first year that starts after `t`
    pub fn next_calendar<'a>(
        &'a self,
        t: NaiveDateTime,
        extras: &'a ExtraPeriods,
    ) -> Option<Calendar<'a>> {
        self.calendars(extras)
            .find(|c| c.start_of_year().is_some_and(|start| start > t))
    }

    /// The last year that ended before `t`
    pub fn previous_calendar<'a>(
        &'a self,
        t: NaiveDateTime,
        extras: &'a ExtraPeriods,
    ) -> Option<Calendar<'a>> {
        self.calendars(extras)
            .filter(|c| c.end_of_year().is_some_and(|end| end < t))
            .last()
    }

    /// What is happening at `t`. `None` means no year contains or follows `t`.
    pub fn resolve(&self, t: NaiveDateTime, extras: &ExtraPeriods) -> Option<Period> {
        if let Some(calendar) = self.calendar(t, extras) {
            return Some(calendar.current_interval(t));
        }

        // Holiday or break inside a year
        if let Some(calendar) = self.calendars(extras).find(|c| c.within_year(t)) {
            debug!("{} is an excluded day in {:?}", t.date(), calendar.name());
            return Some(calendar.current_interval(t));
        }

        let next = self.next_calendar(t, extras)?;
        let end = next.start_of_year()?;
        let start = self
            .previous_calendar(t, extras)
            .and_then(|c| c.end_of_year())
            .unwrap_or(t);
        Some(Period::new("Summer!", PeriodKind::Summer, start, end))
    }
}
