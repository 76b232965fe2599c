//! Default calendar settings
//!
//! The settings collaborator stores work/break windows as plain `HH:MM`
//! strings. They are opaque defaults until [`DefaultsConfig::parse`]
//! validates them; the engine never assumes stored settings satisfy its
//! own invariants.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BREAK_END, DEFAULT_BREAK_START, DEFAULT_WORK_END, DEFAULT_WORK_START,
};
use crate::errors::ScheduleError;

/// Raw default settings as persisted by the settings collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub default_work_start: String,
    pub default_work_end: String,
    pub default_break_start: String,
    pub default_break_end: String,
    #[serde(default = "default_true")]
    pub auto_enable_break: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            default_work_start: DEFAULT_WORK_START.to_string(),
            default_work_end: DEFAULT_WORK_END.to_string(),
            default_break_start: DEFAULT_BREAK_START.to_string(),
            default_break_end: DEFAULT_BREAK_END.to_string(),
            auto_enable_break: true,
        }
    }
}

impl DefaultsConfig {
    /// Validate the raw settings into typed defaults
    ///
    /// # Errors
    /// Returns `ScheduleError::Config` if any time string is not `HH:MM`
    /// (an optional `:SS` suffix is tolerated and dropped, matching how
    /// older settings were stored) or if either window is not ascending.
    pub fn parse(&self) -> Result<CalendarDefaults, ScheduleError> {
        let work_start = parse_time_of_day(&self.default_work_start)?;
        let work_end = parse_time_of_day(&self.default_work_end)?;
        let break_start = parse_time_of_day(&self.default_break_start)?;
        let break_end = parse_time_of_day(&self.default_break_end)?;

        if work_end <= work_start {
            return Err(ScheduleError::Config(
                "default work end must be after default work start".to_string(),
            ));
        }
        if break_end <= break_start {
            return Err(ScheduleError::Config(
                "default break end must be after default break start".to_string(),
            ));
        }

        Ok(CalendarDefaults {
            work_start,
            work_end,
            break_start,
            break_end,
            auto_enable_break: self.auto_enable_break,
        })
    }
}

/// Validated default work and break windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDefaults {
    pub work_start: NaiveTime,
    pub work_end: NaiveTime,
    pub break_start: NaiveTime,
    pub break_end: NaiveTime,
    pub auto_enable_break: bool,
}

/// Parse a `HH:MM` time-of-day string, tolerating a trailing `:SS`
fn parse_time_of_day(value: &str) -> Result<NaiveTime, ScheduleError> {
    let trimmed = value.trim();
    // Settings saved by older clients carry seconds; only HH:MM is
    // significant.
    let hhmm = match trimmed.char_indices().filter(|(_, c)| *c == ':').nth(1) {
        Some((idx, _)) => &trimmed[..idx],
        None => trimmed,
    };

    NaiveTime::parse_from_str(hhmm, "%H:%M").map_err(|_| {
        ScheduleError::Config(format!("invalid time '{value}': expected HH:MM format"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_defaults_parse() {
        let defaults = DefaultsConfig::default().parse().unwrap();
        assert_eq!(defaults.work_start, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(defaults.work_end, NaiveTime::from_hms_opt(18, 30, 0).unwrap());
        assert_eq!(defaults.break_start, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
        assert_eq!(defaults.break_end, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        assert!(defaults.auto_enable_break);
    }

    #[test]
    fn seconds_suffix_is_tolerated() {
        let config = DefaultsConfig {
            default_work_start: "09:30:00".to_string(),
            ..DefaultsConfig::default()
        };
        let defaults = config.parse().unwrap();
        assert_eq!(defaults.work_start, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn malformed_time_is_rejected() {
        let config =
            DefaultsConfig { default_work_start: "9am".to_string(), ..DefaultsConfig::default() };
        assert!(matches!(config.parse(), Err(ScheduleError::Config(_))));

        let config =
            DefaultsConfig { default_break_end: "25:00".to_string(), ..DefaultsConfig::default() };
        assert!(matches!(config.parse(), Err(ScheduleError::Config(_))));
    }

    #[test]
    fn inverted_windows_are_rejected() {
        let config = DefaultsConfig {
            default_work_start: "18:00".to_string(),
            default_work_end: "09:00".to_string(),
            ..DefaultsConfig::default()
        };
        assert!(matches!(config.parse(), Err(ScheduleError::Config(_))));

        let config = DefaultsConfig {
            default_break_start: "14:00".to_string(),
            default_break_end: "13:00".to_string(),
            ..DefaultsConfig::default()
        };
        assert!(matches!(config.parse(), Err(ScheduleError::Config(_))));
    }
}
