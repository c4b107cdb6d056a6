use anyhow::{bail, Context, Result};
use chrono::Duration;
#[cfg(test)]
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::extra_periods::ExtraPeriods;
use tracing::{info, warn};

/// 100 years; larger offsets would overflow chrono's date range
const MAX_OFFSET_SECS: i64 = 100 * 366 * 24 * 3600;

#[derive(Debug, Clone)]
pub struct Config {
    // JSON list of academic years
    pub calendar_path: PathBuf,

    // Inline extra periods, e.g. "wed=seventh,thu=zero"
    pub extra_periods: ExtraPeriods,

    // Optional JSON extra-periods file, re-read on every tick so toggles apply without restart
    pub extra_periods_path: Option<PathBuf>,

    // Shift the system clock (seconds, may be negative). Useful for previewing a day.
    pub clock_offset_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env if present, ignore if missing
        Self::from_getter(|key| env::var(key).ok())
    }

    /// Parse config from a custom getter function (for testing)
    pub fn from_getter<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            calendar_path: get("BELLCHECK_CALENDAR")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "./calendars.json".to_string())
                .into(),

            extra_periods: ExtraPeriods::parse(
                &get("BELLCHECK_EXTRA_PERIODS").unwrap_or_default(),
            ),

            extra_periods_path: get("BELLCHECK_EXTRA_PERIODS_FILE")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),

            clock_offset_secs: match get("BELLCHECK_CLOCK_OFFSET_SECS")
                .filter(|s| !s.trim().is_empty())
            {
                Some(s) => s
                    .trim()
                    .parse()
                    .context("BELLCHECK_CLOCK_OFFSET_SECS must be a whole number of seconds")?,
                None => 0,
            },
        })
    }

    /// Create config from a HashMap (convenience for testing)
    #[cfg(test)]
    pub fn from_map(map: &HashMap<&str, &str>) -> Result<Self> {
        Self::from_getter(|key| map.get(key).map(|v| v.to_string()))
    }

    pub fn clock_offset(&self) -> Duration {
        Duration::seconds(self.clock_offset_secs.clamp(-MAX_OFFSET_SECS, MAX_OFFSET_SECS))
    }

    /// Extra periods for this tick: the file when configured and readable, else the inline value
    pub fn current_extra_periods(&self) -> Result<ExtraPeriods> {
        match &self.extra_periods_path {
            Some(path) => ExtraPeriods::load(path),
            None => Ok(self.extra_periods),
        }
    }

    /// Extra periods for this tick, falling back to `watch`'s last good value
    pub fn refresh_extra_periods(&self, watch: &mut ExtraPeriodsWatch) -> ExtraPeriods {
        watch.update(self.current_extra_periods())
    }

    /// Validate configuration values at startup.
    /// Returns Ok(()) if all validations pass, or Err with details of what failed.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if !Path::new(&self.calendar_path).exists() {
            errors.push(format!(
                "Calendar file not found at '{}'. Set BELLCHECK_CALENDAR.",
                self.calendar_path.display()
            ));
        }

        if let Some(path) = &self.extra_periods_path {
            if let Err(e) = ExtraPeriods::load(path) {
                errors.push(format!("BELLCHECK_EXTRA_PERIODS_FILE: {:#}", e));
            }
        }

        // A year either way is almost certainly a typo
        if self.clock_offset_secs.unsigned_abs() > 366 * 24 * 3600 {
            errors.push(format!(
                "BELLCHECK_CLOCK_OFFSET_SECS={} is more than a year.",
                self.clock_offset_secs
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )
        }
    }
}

/// What happened on the latest extra-periods read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Unchanged,
    Failed,
    Recovered,
}

/// Last good extra-period settings, plus whether the source is currently failing.
/// Logs once per transition so an unreadable file does not warn every tick.
#[derive(Debug, Clone)]
pub struct ExtraPeriodsWatch {
    current: ExtraPeriods,
    failing: bool,
    last: Refresh,
}

impl ExtraPeriodsWatch {
    pub fn new(initial: ExtraPeriods) -> Self {
        Self {
            current: initial,
            failing: false,
            last: Refresh::Unchanged,
        }
    }

    pub fn current(&self) -> ExtraPeriods {
        self.current
    }

    pub fn is_failing(&self) -> bool {
        self.failing
    }

    /// Outcome of the most recent `update`
    pub fn last_refresh(&self) -> Refresh {
        self.last
    }

    pub fn update(&mut self, read: Result<ExtraPeriods>) -> ExtraPeriods {
        self.last = match read {
            Ok(extras) => {
                self.current = extras;
                if self.failing {
                    self.failing = false;
                    info!("Extra periods readable again");
                    Refresh::Recovered
                } else {
                    Refresh::Unchanged
                }
            }
            Err(e) if !self.failing => {
                self.failing = true;
                warn!("Keeping previous extra periods: {:#}", e);
                Refresh::Failed
            }
            Err(_) => Refresh::Unchanged,
        };
        self.current
    }
}
