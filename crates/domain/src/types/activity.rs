//! Activity types
//!
//! An activity is one scheduled work interval for an employee, optionally
//! tagged with project/task/activity-type. Activities are owned by the
//! persistence collaborator; the engine only produces and validates them.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::SECONDS_PER_HOUR;

/// One scheduled work interval for an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Absent until the store has persisted the record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub employee: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Activity {
    /// Duration of this activity in fractional hours
    pub fn hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / SECONDS_PER_HOUR
    }
}

/// Break window within an activity, expressed as times-of-day
///
/// The window has no date component; it is resolved onto the calendar date
/// of the owning activity's start when the activity is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// A proposed activity, as produced by a calendar selection or dialog
///
/// Drafts are unvalidated input. The scheduler turns a draft into one or
/// two persisted [`Activity`] records or rejects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub employee: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_window: Option<BreakWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ActivityDraft {
    /// The draft as a single unpersisted activity, break ignored
    pub fn to_activity(&self) -> Activity {
        Activity {
            id: None,
            employee: self.employee.clone(),
            start: self.start,
            end: self.end,
            project: self.project.clone(),
            task: self.task.clone(),
            activity_type: self.activity_type.clone(),
            description: self.description.clone(),
        }
    }
}

/// Partial update for a persisted activity
///
/// Only `start`/`end` participate in range and overlap validation; the
/// remaining fields pass through to the store unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ActivityPatch {
    /// Patch containing only new start/end times (drag or resize on the
    /// calendar)
    pub fn reschedule(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start: Some(start), end: Some(end), ..Self::default() }
    }
}
