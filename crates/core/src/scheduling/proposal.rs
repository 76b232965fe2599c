//! Proposal pre-fill from calendar selections
//!
//! A click on the calendar (a selection of 30 minutes or less) expands to
//! a full default workday, with the default break attached when auto-break
//! is enabled. A longer drag becomes a draft for exactly the selected
//! range. Defaults come from the settings collaborator and are already
//! validated by the time they reach this module; the scheduler still
//! re-validates the resulting draft like any other input.

use chrono::{DateTime, Duration, Utc};
use timegrid_domain::constants::SHORT_SELECTION_MINUTES;
use timegrid_domain::{ActivityDraft, BreakWindow, CalendarDefaults};

/// Build a draft for a calendar time selection
pub fn from_selection(
    employee: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    defaults: &CalendarDefaults,
) -> ActivityDraft {
    if end - start <= Duration::minutes(SHORT_SELECTION_MINUTES) {
        full_workday(employee, start, defaults)
    } else {
        ActivityDraft {
            employee: employee.to_string(),
            start,
            end,
            break_window: None,
            project: None,
            task: None,
            activity_type: None,
            description: None,
        }
    }
}

/// Build a full-workday draft on the date of `selected`
pub fn full_workday(
    employee: &str,
    selected: DateTime<Utc>,
    defaults: &CalendarDefaults,
) -> ActivityDraft {
    let date = selected.date_naive();
    let break_window = defaults
        .auto_enable_break
        .then_some(BreakWindow { start: defaults.break_start, end: defaults.break_end });

    ActivityDraft {
        employee: employee.to_string(),
        start: date.and_time(defaults.work_start).and_utc(),
        end: date.and_time(defaults.work_end).and_utc(),
        break_window,
        project: None,
        task: None,
        activity_type: None,
        description: None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use timegrid_domain::DefaultsConfig;

    use super::*;

    fn defaults() -> CalendarDefaults {
        DefaultsConfig::default().parse().unwrap()
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 11, h, m, 0).unwrap()
    }

    #[test]
    fn short_selection_expands_to_default_workday() {
        let draft = from_selection("EMP-0001", at(10, 0), at(10, 30), &defaults());

        assert_eq!(draft.start, at(9, 30));
        assert_eq!(draft.end, at(18, 30));
        let window = draft.break_window.unwrap();
        assert_eq!(window.start.to_string(), "13:00:00");
        assert_eq!(window.end.to_string(), "14:00:00");
    }

    #[test]
    fn long_selection_is_taken_literally() {
        let draft = from_selection("EMP-0001", at(10, 0), at(12, 0), &defaults());

        assert_eq!(draft.start, at(10, 0));
        assert_eq!(draft.end, at(12, 0));
        assert_eq!(draft.break_window, None);
    }

    #[test]
    fn auto_break_off_leaves_workday_unbroken() {
        let mut defaults = defaults();
        defaults.auto_enable_break = false;

        let draft = full_workday("EMP-0001", at(10, 0), &defaults);
        assert_eq!(draft.break_window, None);
    }

    #[test]
    fn workday_lands_on_selected_date() {
        let draft = full_workday("EMP-0001", at(0, 15), &defaults());
        assert_eq!(draft.start.date_naive(), at(0, 15).date_naive());
    }
}
