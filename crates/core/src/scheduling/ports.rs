//! Port interfaces for activity scheduling
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations. All I/O the scheduler needs is
//! reached through them; the core holds no storage of its own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use timegrid_domain::{Activity, ActivityPatch, RawPermissions, Result};
use uuid::Uuid;

/// Trait for resolving the acting user's authorization scope
///
/// Resolved once per session context; the payload stays immutable for the
/// duration of a scheduling operation.
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Fetch the raw permission payload for the current session
    async fn resolve(&self) -> Result<RawPermissions>;
}

/// Trait for the external activity persistence collaborator
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Activities overlapping the given range, optionally scoped to one
    /// employee
    ///
    /// Feeds the overlap check, so the result must contain every activity
    /// of the employee that intersects the range.
    async fn query(
        &self,
        employee: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Activity>>;

    /// Fetch a single persisted activity by id
    async fn get(&self, id: Uuid) -> Result<Option<Activity>>;

    /// Persist one record and return its assigned id
    async fn create(&self, activity: &Activity) -> Result<Uuid>;

    /// Apply a partial update to a persisted record
    async fn update(&self, id: Uuid, patch: &ActivityPatch) -> Result<()>;

    /// Delete a persisted record
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// A project as listed by the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

/// Trait for project/task lookups backing consistency checks
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// The project a task belongs to, if any
    async fn project_of_task(&self, task: &str) -> Result<Option<String>>;

    /// Projects the employee is assigned to
    async fn assigned_projects(&self, employee: &str) -> Result<Vec<ProjectRef>>;
}
