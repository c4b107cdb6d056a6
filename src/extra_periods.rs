/// Per-weekday zero/seventh period toggles
/// Owned by the caller and passed into every resolution so a toggle takes effect on the next tick

use anyhow::{Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Extra periods observed on one weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DayExtras {
    pub zero: bool,
    pub seventh: bool,
}

/// One entry per weekday. Unknown keys in a JSON file are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraPeriods {
    pub sunday: DayExtras,
    pub monday: DayExtras,
    pub tuesday: DayExtras,
    pub wednesday: DayExtras,
    pub thursday: DayExtras,
    pub friday: DayExtras,
    pub saturday: DayExtras,
}

impl ExtraPeriods {
    pub fn get(&self, day: Weekday) -> DayExtras {
        match day {
            Weekday::Sun => self.sunday,
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
        }
    }

    pub fn set(&mut self, day: Weekday, extras: DayExtras) {
        let slot = match day {
            Weekday::Sun => &mut self.sunday,
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
        };
        *slot = extras;
    }

    /// Parse the inline form, e.g. `mon=zero,wed=seventh,thu=zero+seventh`.
    /// Unknown weekdays and flags are skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut result = Self::default();

        for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let Some((day, flags)) = entry.split_once('=') else {
                warn!("Ignoring extra period entry without '=': {:?}", entry);
                continue;
            };
            let Ok(day) = day.trim().parse::<Weekday>() else {
                warn!("Ignoring extra periods for unknown weekday {:?}", day);
                continue;
            };

            let mut extras = result.get(day);
            for flag in flags.split('+').map(str::trim) {
                match flag.to_ascii_lowercase().as_str() {
                    "zero" | "0" => extras.zero = true,
                    "seventh" | "7" => extras.seventh = true,
                    "none" | "" => {}
                    other => warn!("Ignoring unknown extra period {:?} for {}", other, day),
                }
            }
            result.set(day, extras);
        }

        result
    }

    /// Load the JSON form, e.g. `{"wednesday": {"seventh": true}}`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read extra periods file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid extra periods file {}", path.display()))
    }
}
