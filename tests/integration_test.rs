/// Integration tests for calendar loading and end-to-end interval resolution
/// Drives the public API the way the binary does: JSON calendar -> CalendarSet -> Status

use chrono::{Duration, NaiveDate, NaiveDateTime, Weekday};

use bellcheck::calendar_data::parse_calendars;
use bellcheck::clock::{Clock, FixedClock, SteppedClock};
use bellcheck::datetime::{hhmmss, parse_hhmmss};
use bellcheck::extra_periods::{DayExtras, ExtraPeriods};
use bellcheck::period::PeriodKind;
use bellcheck::selection::CalendarSet;
use bellcheck::status::Status;

const CALENDARS: &str = r#"[
    {
        "name": "2025-26",
        "start": "2025-09-02",
        "end": "2026-06-10",
        "holidays": ["2025-11-11", "2026-01-19"],
        "breaks": [
            {"name": "Thanksgiving", "start": "2025-11-24", "end": "2025-11-28"},
            {"name": "Winter", "start": "2025-12-22", "end": "2026-01-02"}
        ]
    },
    {
        "name": "2026-27",
        "start": "2026-08-18",
        "end": "2027-06-09"
    }
]"#;

fn set() -> CalendarSet {
    CalendarSet::new(parse_calendars(CALENDARS).expect("calendar fixture should parse"))
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

/// Tuesday 2025-09-09 with Period 0 enabled on Tuesdays
fn tuesday_with_zero() -> ExtraPeriods {
    let mut extras = ExtraPeriods::default();
    extras.set(Weekday::Tue, DayExtras { zero: true, seventh: false });
    extras
}

#[test]
fn test_tuesday_morning_walkthrough() {
    let set = set();
    let extras = tuesday_with_zero();

    let p = set.resolve(at(2025, 9, 9, 7, 0, 0), &extras).unwrap();
    assert_eq!(p.name, "Before school");
    assert_eq!(p.end, at(2025, 9, 9, 7, 23, 0));

    let p = set.resolve(at(2025, 9, 9, 7, 23, 0), &extras).unwrap();
    assert_eq!(p.name, "Period 0");
    assert_eq!((p.start, p.end), (at(2025, 9, 9, 7, 23, 0), at(2025, 9, 9, 8, 21, 0)));

    let p = set.resolve(at(2025, 9, 9, 8, 22, 0), &extras).unwrap();
    assert_eq!(p.name, "Passing period");
    assert_eq!((p.start, p.end), (at(2025, 9, 9, 8, 21, 0), at(2025, 9, 9, 8, 27, 0)));
    assert!(p.during_school());
    assert!(!p.is_class());
}

#[test]
fn test_tuesday_without_extras_starts_with_period_one() {
    let set = set();
    let extras = ExtraPeriods::default();

    let p = set.resolve(at(2025, 9, 9, 7, 30, 0), &extras).unwrap();
    assert_eq!(p.name, "Before school");
    assert_eq!(p.end, at(2025, 9, 9, 8, 27, 0));

    let p = set.resolve(at(2025, 9, 9, 8, 27, 0), &extras).unwrap();
    assert_eq!(p.name, "Period 1");
}

#[test]
fn test_friday_after_school_runs_to_monday_late_start() {
    let set = set();
    let extras = ExtraPeriods::default();
    let p = set.resolve(at(2025, 9, 12, 16, 40, 0), &extras).unwrap();
    assert_eq!(p.name, "After school");
    assert_eq!(p.kind, PeriodKind::AfterSchool);
    assert_eq!(p.end, at(2025, 9, 15, 9, 57, 0));
}

#[test]
fn test_weekend_spans_friday_to_monday() {
    let set = set();
    let extras = ExtraPeriods::default();
    for t in [at(2025, 9, 13, 0, 0, 0), at(2025, 9, 14, 23, 59, 59)] {
        let p = set.resolve(t, &extras).unwrap();
        assert_eq!(p.name, "Weekend!");
        assert_eq!(p.start, at(2025, 9, 12, 15, 30, 0));
        assert_eq!(p.end, at(2025, 9, 15, 9, 57, 0));
    }
}

#[test]
fn test_thanksgiving_break() {
    let set = set();
    let extras = ExtraPeriods::default();

    let p = set.resolve(at(2025, 11, 21, 15, 45, 0), &extras).unwrap();
    assert_eq!(p.name, "After school");
    assert_eq!(p.end, at(2025, 12, 1, 9, 57, 0));

    let p = set.resolve(at(2025, 11, 26, 12, 0, 0), &extras).unwrap();
    assert_eq!(p.kind, PeriodKind::DayOff);
    assert_eq!(p.start, at(2025, 11, 21, 15, 30, 0));
    assert_eq!(p.end, at(2025, 12, 1, 9, 57, 0));

    // The weekend after the break still runs to the Monday back
    let p = set.resolve(at(2025, 11, 29, 12, 0, 0), &extras).unwrap();
    assert_eq!(p.kind, PeriodKind::Weekend);
    assert_eq!(p.end, at(2025, 12, 1, 9, 57, 0));
}

#[test]
fn test_monday_holiday_pushes_to_tuesday() {
    let set = set();
    let extras = ExtraPeriods::default();
    // 2026-01-19 is a Monday holiday
    let p = set.resolve(at(2026, 1, 17, 12, 0, 0), &extras).unwrap();
    assert_eq!(p.kind, PeriodKind::Weekend);
    assert_eq!(p.end, at(2026, 1, 20, 8, 27, 0));
}

#[test]
fn test_summer_countdown() {
    let set = set();
    let extras = ExtraPeriods::default();
    let t = at(2026, 7, 4, 12, 0, 0);
    let status = Status::at(&set, &extras, t);
    assert_eq!(status.kind(), Some(PeriodKind::Summer));
    let p = status.period.as_ref().unwrap();
    assert_eq!(p.start, at(2026, 6, 10, 15, 30, 0));
    assert_eq!(p.end, at(2026, 8, 18, 8, 27, 0));
    assert!(status.left.contains("days"));
}

#[test]
fn test_no_data_after_last_year() {
    let set = set();
    let extras = ExtraPeriods::default();
    let status = Status::at(&set, &extras, at(2027, 7, 1, 12, 0, 0));
    assert!(status.period.is_none());
    assert_eq!(status.name(), "No schedule");
    assert_eq!(status.days_left, None);
}

#[test]
fn test_school_days_left_on_last_day() {
    let set = set();
    let extras = ExtraPeriods::default();
    let t = at(2026, 6, 10, 10, 0, 0);
    let calendar = set.calendar(t, &extras).unwrap();
    assert_eq!(calendar.school_days_left(t), 1);
    assert_eq!(calendar.school_days_left(at(2026, 6, 10, 23, 59, 0)), 0);
}

#[test]
fn test_extra_periods_read_fresh_each_call() {
    let set = set();
    let t = at(2025, 9, 9, 15, 45, 0);

    let mut extras = ExtraPeriods::default();
    assert_eq!(set.resolve(t, &extras).unwrap().name, "After school");

    extras.set(Weekday::Tue, DayExtras { zero: false, seventh: true });
    assert_eq!(set.resolve(t, &extras).unwrap().name, "Period 7");
}

#[test]
fn test_countdown_text_round_trips() {
    let set = set();
    let extras = ExtraPeriods::default();
    let t = at(2025, 9, 9, 9, 0, 30);
    let status = Status::at(&set, &extras, t);
    let p = status.period.as_ref().unwrap();
    assert_eq!(status.left, hhmmss(p.end - t));
    assert_eq!(parse_hhmmss(&status.left), Some(p.end - t));
}

#[test]
fn test_stepped_clock_walks_through_a_day() {
    let set = set();
    let extras = ExtraPeriods::default();
    let clock = SteppedClock::new(at(2025, 9, 9, 0, 0, 0), Duration::minutes(1));

    let mut names = Vec::new();
    for _ in 0..(24 * 60) {
        let p = set.resolve(clock.now(), &extras).unwrap();
        if names.last() != Some(&p.name) {
            names.push(p.name);
        }
    }

    assert_eq!(
        names,
        [
            "Before school",
            "Period 1",
            "Passing period",
            "Period 2",
            "Passing period",
            "Period 3",
            "Lunch",
            "Passing period",
            "Period 4",
            "Passing period",
            "Period 5",
            "Passing period",
            "Period 6",
            "After school",
        ]
    );
}

#[test]
fn test_fixed_clock_status() {
    let set = set();
    let extras = ExtraPeriods::default();
    let clock = FixedClock(at(2025, 9, 9, 12, 0, 0));
    let status = Status::at(&set, &extras, clock.now());
    assert_eq!(status.name(), "Lunch");
    assert_eq!(status.today, "03:30:00");
}
