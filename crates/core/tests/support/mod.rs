//! Shared test helpers for `timegrid-core` integration tests.
//!
//! In-memory mocks for the scheduling ports, enabling deterministic
//! pipeline tests without infrastructure dependencies. Mutating calls are
//! counted so tests can assert that rejections carry zero side effects.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use timegrid_core::scheduling::ports::{
    ActivityStore, PermissionService, ProjectDirectory, ProjectRef,
};
use timegrid_domain::{Activity, ActivityPatch, RawPermissions, Result, ScheduleError};
use uuid::Uuid;

#[derive(Default)]
struct StoreState {
    activities: Vec<Activity>,
    create_calls: usize,
    update_calls: usize,
    delete_calls: usize,
    /// Creates start failing once this many have succeeded
    fail_creates_after: Option<usize>,
}

/// In-memory mock for `ActivityStore`.
#[derive(Default, Clone)]
pub struct MockActivityStore {
    state: Arc<Mutex<StoreState>>,
}

impl MockActivityStore {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { state: Arc::new(Mutex::new(StoreState { activities, ..StoreState::default() })) }
    }

    /// Convenience helper for adding a single persisted activity.
    pub fn with_activity(self, activity: Activity) -> Self {
        self.state.lock().activities.push(activity);
        self
    }

    /// Make every create after the first `successes` fail with a
    /// persistence error.
    pub fn failing_creates_after(self, successes: usize) -> Self {
        self.state.lock().fail_creates_after = Some(successes);
        self
    }

    pub fn activities(&self) -> Vec<Activity> {
        self.state.lock().activities.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().create_calls
    }

    pub fn mutation_calls(&self) -> usize {
        let state = self.state.lock();
        state.create_calls + state.update_calls + state.delete_calls
    }
}

#[async_trait]
impl ActivityStore for MockActivityStore {
    async fn query(
        &self,
        employee: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Activity>> {
        Ok(self
            .state
            .lock()
            .activities
            .iter()
            .filter(|a| employee.map_or(true, |e| a.employee == e))
            .filter(|a| a.start < end && a.end > start)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Activity>> {
        Ok(self.state.lock().activities.iter().find(|a| a.id == Some(id)).cloned())
    }

    async fn create(&self, activity: &Activity) -> Result<Uuid> {
        let mut state = self.state.lock();
        state.create_calls += 1;

        if let Some(limit) = state.fail_creates_after {
            if state.create_calls > limit {
                return Err(ScheduleError::Persistence("store rejected create".to_string()));
            }
        }

        let id = Uuid::new_v4();
        let mut persisted = activity.clone();
        persisted.id = Some(id);
        state.activities.push(persisted);
        Ok(id)
    }

    async fn update(&self, id: Uuid, patch: &ActivityPatch) -> Result<()> {
        let mut state = self.state.lock();
        state.update_calls += 1;

        let activity = state
            .activities
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
        let mut state = self.state.lock();
        state.delete_calls += 1;

        let before = state.activities.len();
        state.activities.retain(|a| a.id != Some(id));
        if state.activities.len() == before {
            return Err(ScheduleError::NotFound(id));
        }
        Ok(())
    }
}

/// In-memory mock for `ProjectDirectory`.
#[derive(Default, Clone)]
pub struct MockProjectDirectory {
    task_projects: Arc<HashMap<String, String>>,
    assignments: Arc<HashMap<String, Vec<ProjectRef>>>,
}

impl MockProjectDirectory {
    pub fn new(
        task_projects: HashMap<String, String>,
        assignments: HashMap<String, Vec<ProjectRef>>,
    ) -> Self {
        Self { task_projects: Arc::new(task_projects), assignments: Arc::new(assignments) }
    }
}

#[async_trait]
impl ProjectDirectory for MockProjectDirectory {
    async fn project_of_task(&self, task: &str) -> Result<Option<String>> {
        Ok(self.task_projects.get(task).cloned())
    }

    async fn assigned_projects(&self, employee: &str) -> Result<Vec<ProjectRef>> {
        Ok(self.assignments.get(employee).cloned().unwrap_or_default())
    }
}

/// Mock permission service returning a fixed payload or a fixed failure.
pub struct MockPermissionService {
    outcome: std::result::Result<RawPermissions, String>,
}

impl MockPermissionService {
    pub fn returning(raw: RawPermissions) -> Self {
        Self { outcome: Ok(raw) }
    }

    pub fn failing(reason: &str) -> Self {
        Self { outcome: Err(reason.to_string()) }
    }
}

#[async_trait]
impl PermissionService for MockPermissionService {
    async fn resolve(&self) -> Result<RawPermissions> {
        self.outcome.clone().map_err(ScheduleError::Persistence)
    }
}
