//! bellcheck library - school bell schedule resolution
//!
//! Given a set of academic years and an instant, resolves the current period
//! (class, lunch, passing period, before/after school, weekend, day off or
//! summer) and derives the countdowns shown to the user.

pub mod calendar;
pub mod calendar_data;
pub mod cli;
pub mod clock;
pub mod config;
pub mod datetime;
pub mod extra_periods;
pub mod period;
pub mod schedule;
pub mod selection;
pub mod status;
pub mod ticker;
