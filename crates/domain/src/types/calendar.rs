//! Calendar view of persisted activities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::activity::Activity;

/// Read-mostly view of a persisted activity as rendered on the calendar
///
/// Mirrors the activity fields plus the derived title and fractional hours.
/// Mutation happens by issuing scheduler operations and re-querying, never
/// by editing the event in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub employee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub hours: f64,
}

impl CalendarEvent {
    /// Build the event view for a persisted activity
    ///
    /// Returns `None` for records the store has not assigned an id yet;
    /// unpersisted activities never reach the calendar.
    pub fn from_activity(activity: &Activity) -> Option<Self> {
        let id = activity.id?;
        Some(Self {
            id,
            title: format!(
                "{} - {}",
                activity.project.as_deref().unwrap_or(""),
                activity.activity_type.as_deref().unwrap_or("")
            ),
            start: activity.start,
            end: activity.end,
            employee: activity.employee.clone(),
            project: activity.project.clone(),
            task: activity.task.clone(),
            activity_type: activity.activity_type.clone(),
            description: activity.description.clone(),
            hours: activity.hours(),
        })
    }
}
