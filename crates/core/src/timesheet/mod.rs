//! Weekly timesheet grouping and reporting
//!
//! Activities belong to per-employee weekly timesheets; weeks run Monday
//! through Sunday. Aggregation works over the calendar-event view and
//! keeps deterministic ordering so report rows are stable.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use timegrid_domain::{Activity, ActivitySummary, CalendarEvent, WeeklyTimesheet};

/// The Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_since_monday = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(days_since_monday)).unwrap_or(date)
}

/// The Sunday closing the week containing `date`
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let monday = week_start(date);
    monday.checked_add_days(Days::new(6)).unwrap_or(monday)
}

/// Group activities into per-employee weekly timesheets
///
/// An activity belongs to the week of its start date. Timesheets come out
/// ordered by employee, then week.
pub fn group_by_week(activities: &[Activity]) -> Vec<WeeklyTimesheet> {
    let mut weeks: BTreeMap<(String, NaiveDate), Vec<Activity>> = BTreeMap::new();

    for activity in activities {
        let key = (activity.employee.clone(), week_start(activity.start.date_naive()));
        weeks.entry(key).or_default().push(activity.clone());
    }

    weeks
        .into_iter()
        .map(|((employee, start_date), activities)| {
            let total_hours = activities.iter().map(Activity::hours).sum();
            WeeklyTimesheet {
                employee,
                start_date,
                end_date: week_end(start_date),
                activities,
                total_hours,
            }
        })
        .collect()
}

/// Aggregate calendar events into a report summary
pub fn summarize(events: &[CalendarEvent]) -> ActivitySummary {
    let mut summary = ActivitySummary::default();

    for event in events {
        let hours = event.hours;
        summary.total_hours += hours;

        *summary.by_employee.entry(event.employee.clone()).or_default() += hours;

        if let Some(project) = &event.project {
            *summary.by_project.entry(project.clone()).or_default() += hours;
        }

        if let Some(activity_type) = &event.activity_type {
            *summary.by_activity_type.entry(activity_type.clone()).or_default() += hours;
        }

        *summary.daily_totals.entry(event.start.date_naive()).or_default() += hours;
    }

    summary
}

/// Total hours booked by an employee on one day
pub fn day_total(events: &[CalendarEvent], date: NaiveDate, employee: Option<&str>) -> f64 {
    events
        .iter()
        .filter(|event| event.start.date_naive() == date)
        .filter(|event| employee.map_or(true, |e| event.employee == e))
        .map(|event| event.hours)
        .sum()
}

/// Render fractional hours as "7h 30m"
pub fn format_duration(hours: f64) -> String {
    if hours <= 0.0 {
        return "0h".to_string();
    }

    let total_minutes = (hours * 60.0).round() as i64;
    let h = total_minutes / 60;
    let m = total_minutes % 60;

    if m > 0 {
        format!("{h}h {m}m")
    } else {
        format!("{h}h")
    }
}
