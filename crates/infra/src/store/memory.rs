//! In-memory implementations of the scheduling ports
//!
//! Used by tests and by offline operation where no remote timesheet
//! service is configured. Semantics mirror the REST gateway: ids are
//! assigned on create, queries are half-open range scans.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use timegrid_core::scheduling::ports::{
    ActivityStore, PermissionService, ProjectDirectory, ProjectRef,
};
use timegrid_domain::{Activity, ActivityPatch, RawPermissions, Result, ScheduleError};
use uuid::Uuid;

/// In-memory `ActivityStore`
#[derive(Default, Clone)]
pub struct InMemoryActivityStore {
    activities: Arc<RwLock<Vec<Activity>>>,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already-persisted activities
    ///
    /// Records without an id are assigned one, as the store would on
    /// create.
    pub fn seeded(activities: Vec<Activity>) -> Self {
        let activities = activities
            .into_iter()
            .map(|mut activity| {
                activity.id = activity.id.or_else(|| Some(Uuid::new_v4()));
                activity
            })
            .collect();
        Self { activities: Arc::new(RwLock::new(activities)) }
    }

    /// Snapshot of the stored activities
    pub fn all(&self) -> Vec<Activity> {
        self.activities.read().clone()
    }
}

#[async_trait]
impl ActivityStore for InMemoryActivityStore {
    async fn query(
        &self,
        employee: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Activity>> {
        Ok(self
            .activities
            .read()
            .iter()
            .filter(|a| employee.map_or(true, |e| a.employee == e))
            .filter(|a| a.start < end && a.end > start)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Activity>> {
        Ok(self.activities.read().iter().find(|a| a.id == Some(id)).cloned())
    }

    async fn create(&self, activity: &Activity) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let mut persisted = activity.clone();
        persisted.id = Some(id);
        self.activities.write().push(persisted);
        Ok(id)
    }

    async fn update(&self, id: Uuid, patch: &ActivityPatch) -> Result<()> {
        let mut activities = self.activities.write();
        let activity = activities
            .iter_mut()
            .find(|a| a.id == Some(id))
            .ok_or(ScheduleError::NotFound(id))?;

        if let Some(start) = patch.start {
            activity.start = start;
        }
        if let Some(end) = patch.end {
            activity.end = end;
        }
        if let Some(project) = &patch.project {
            activity.project = Some(project.clone());
        }
        if let Some(task) = &patch.task {
            activity.task = Some(task.clone());
        }
        if let Some(activity_type) = &patch.activity_type {
            activity.activity_type = Some(activity_type.clone());
        }
        if let Some(description) = &patch.description {
            activity.description = Some(description.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut activities = self.activities.write();
        let before = activities.len();
        activities.retain(|a| a.id != Some(id));
        if activities.len() == before {
            return Err(ScheduleError::NotFound(id));
        }
        Ok(())
    }
}

/// In-memory `ProjectDirectory` backed by fixed lookup tables
#[derive(Default, Clone)]
pub struct InMemoryProjectDirectory {
    task_projects: Arc<RwLock<HashMap<String, String>>>,
    assignments: Arc<RwLock<HashMap<String, Vec<ProjectRef>>>>,
}

impl InMemoryProjectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task as belonging to a project
    pub fn with_task(self, task: &str, project: &str) -> Self {
        self.task_projects.write().insert(task.to_string(), project.to_string());
        self
    }

    /// Assign an employee to a project
    pub fn with_assignment(self, employee: &str, project: ProjectRef) -> Self {
        self.assignments.write().entry(employee.to_string()).or_default().push(project);
        self
    }
}

#[async_trait]
impl ProjectDirectory for InMemoryProjectDirectory {
    async fn project_of_task(&self, task: &str) -> Result<Option<String>> {
        Ok(self.task_projects.read().get(task).cloned())
    }

    async fn assigned_projects(&self, employee: &str) -> Result<Vec<ProjectRef>> {
        Ok(self.assignments.read().get(employee).cloned().unwrap_or_default())
    }
}

/// Permission service returning a fixed payload
///
/// Stands in for the remote session lookup in tests and single-user
/// deployments.
#[derive(Debug, Clone)]
pub struct StaticPermissionService {
    permissions: RawPermissions,
}

impl StaticPermissionService {
    pub fn new(permissions: RawPermissions) -> Self {
        Self { permissions }
    }

    /// A privileged session that may edit everything
    pub fn privileged() -> Self {
        Self::new(RawPermissions { is_employee_only: false, current_employee: None })
    }

    /// A session scoped to a single employee
    pub fn employee(employee: &str) -> Self {
        Self::new(RawPermissions {
            is_employee_only: true,
            current_employee: Some(employee.to_string()),
        })
    }
}

#[async_trait]
impl PermissionService for StaticPermissionService {
    async fn resolve(&self) -> Result<RawPermissions> {
        Ok(self.permissions.clone())
    }
}
