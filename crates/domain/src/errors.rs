//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Reason a proposed time range was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeViolation {
    #[error("End time must be after start time")]
    EndBeforeStart,

    #[error("Activity cannot be longer than 24 hours")]
    DurationTooLong,
}

/// Reason a break window was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakViolation {
    #[error("Break must be within the activity time range")]
    OutOfRange,

    #[error("Break end must be after break start")]
    EndNotAfterStart,

    #[error("Break would leave an empty activity segment")]
    DegenerateSegment,
}

/// Main error type for TimeGrid scheduling operations
///
/// Every variant carries a human-readable message so callers can render an
/// accurate rejection without inspecting the variant.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum ScheduleError {
    #[error("Not authorized to modify activities for this employee")]
    PermissionDenied,

    #[error("Invalid time range: {0}")]
    InvalidRange(RangeViolation),

    #[error("Invalid break time: {0}")]
    InvalidBreak(BreakViolation),

    #[error("An activity already exists for the selected day and time slot")]
    Overlap { conflicting_id: Uuid },

    #[error("The selected project does not match the project of the task")]
    TaskProjectMismatch,

    #[error("Employee is not assigned to the selected project")]
    ProjectNotAssigned,

    #[error("Activity not found: {0}")]
    NotFound(Uuid),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The first half of a break-split create committed but the second did
    /// not. The committed activity exists in the store and is not rolled
    /// back.
    #[error("Second half of split activity failed after first was created: {reason}")]
    PartialSplit { committed: Uuid, reason: String },
}

/// Result type alias for TimeGrid operations
pub type Result<T> = std::result::Result<T, ScheduleError>;
