//! Academic year definitions, as loaded from a JSON calendar file
//!
//! ```json
//! [
//!   {
//!     "name": "2025-26",
//!     "start": "2025-08-20",
//!     "end": "2026-06-10",
//!     "holidays": ["2025-09-01", "2025-11-11"],
//!     "breaks": [{ "name": "Winter", "start": "2025-12-22", "end": "2026-01-02" }]
//!   }
//! ]
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarDataError {
    #[error("cannot read calendar file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid calendar data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("year {name:?} ends ({end}) before it starts ({start})")]
    InvertedYear {
        name: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("break {name:?} in year {year:?} ends ({end}) before it starts ({start})")]
    InvertedBreak {
        year: String,
        name: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Inclusive range of non-school dates (winter break, spring break, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRange {
    #[serde(default)]
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BreakRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One academic year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearDefinition {
    #[serde(default)]
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    #[serde(default)]
    pub breaks: Vec<BreakRange>,
}

impl YearDefinition {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            holidays: Vec::new(),
            breaks: Vec::new(),
        }
    }

    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.push(date);
        self
    }

    pub fn with_break(mut self, name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        self.breaks.push(BreakRange {
            name: name.into(),
            start,
            end,
        });
        self
    }

    /// Holiday or inside a break
    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date) || self.breaks.iter().any(|b| b.contains(date))
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn validate(&self) -> Result<(), CalendarDataError> {
        if self.end < self.start {
            return Err(CalendarDataError::InvertedYear {
                name: self.name.clone(),
                start: self.start,
                end: self.end,
            });
        }
        if let Some(b) = self.breaks.iter().find(|b| b.end < b.start) {
            return Err(CalendarDataError::InvertedBreak {
                year: self.name.clone(),
                name: b.name.clone(),
                start: b.start,
                end: b.end,
            });
        }
        Ok(())
    }
}

/// Parse and validate a JSON list of years. An empty list is valid.
pub fn parse_calendars(text: &str) -> Result<Vec<YearDefinition>, CalendarDataError> {
    let years: Vec<YearDefinition> = serde_json::from_str(text)?;
    for year in &years {
        year.validate()?;
    }
    Ok(years)
}

pub fn load_calendars(path: impl AsRef<Path>) -> Result<Vec<YearDefinition>, CalendarDataError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CalendarDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_calendars(&text)
}
