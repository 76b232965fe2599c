//! Weekly timesheet and reporting types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::activity::Activity;

/// Activities of one employee grouped into one calendar week
///
/// Weeks run Monday through Sunday; `start_date` is always a Monday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTimesheet {
    pub employee: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub activities: Vec<Activity>,
    pub total_hours: f64,
}

/// Aggregate report over a set of calendar events
///
/// Maps are ordered so report rows render deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub total_hours: f64,
    pub by_employee: BTreeMap<String, f64>,
    pub by_project: BTreeMap<String, f64>,
    pub by_activity_type: BTreeMap<String, f64>,
    pub daily_totals: BTreeMap<NaiveDate, f64>,
}
