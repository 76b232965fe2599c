//! Activity scheduling service - core business logic
//!
//! One linear pipeline per requested operation:
//! permission -> range -> project consistency -> overlap -> split ->
//! persist. Each stage either advances or terminates the operation with a
//! specific rejection; there are no backward transitions and no internal
//! retries. All validation failures are detected before the first
//! persistence call.

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveTime, Utc};
use timegrid_domain::{Activity, ActivityDraft, ActivityPatch, Principal, Result, ScheduleError};
use tracing::{error, warn};
use uuid::Uuid;

use super::ports::{ActivityStore, PermissionService, ProjectDirectory};
use super::{break_split, overlap, permissions, time_range};

/// Activity scheduling service
///
/// Owns no storage; the store and directory collaborators are supplied at
/// construction and the principal is supplied fresh per operation.
pub struct ActivityScheduler {
    store: Arc<dyn ActivityStore>,
    directory: Arc<dyn ProjectDirectory>,
}

impl ActivityScheduler {
    /// Create a new scheduler over the given collaborators
    pub fn new(store: Arc<dyn ActivityStore>, directory: Arc<dyn ProjectDirectory>) -> Self {
        Self { store, directory }
    }

    /// Resolve the session principal from the permission service
    ///
    /// Never propagates a fault past this boundary: a failed or malformed
    /// permission lookup resolves to no principal, and every later check
    /// on it denies.
    pub async fn resolve_session(service: &dyn PermissionService) -> Option<Principal> {
        match service.resolve().await {
            Ok(raw) => permissions::resolve_principal(&raw),
            Err(err) => {
                warn!(error = %err, "permission lookup failed, denying access");
                None
            }
        }
    }

    /// Validate and persist a proposed activity
    ///
    /// A draft with a break window persists as two records committed in
    /// order. The two-step create is not atomic: when the second half
    /// fails after the first committed, the outcome is
    /// [`ScheduleError::PartialSplit`] carrying the committed id, and the
    /// first half stays in the store.
    ///
    /// Returns the ids of the created records, in commit order.
    pub async fn create(
        &self,
        principal: Option<&Principal>,
        draft: &ActivityDraft,
    ) -> Result<Vec<Uuid>> {
        if !permissions::can_edit(principal, &draft.employee) {
            return Err(ScheduleError::PermissionDenied);
        }

        time_range::validate(draft.start, draft.end).map_err(ScheduleError::InvalidRange)?;

        self.check_project_consistency(
            principal,
            &draft.employee,
            draft.project.as_deref(),
            draft.task.as_deref(),
        )
        .await?;

        self.check_overlap(&draft.employee, draft.start, draft.end, None).await?;

        let records = break_split::split(draft).map_err(ScheduleError::InvalidBreak)?;

        self.commit(&records).await
    }

    /// Validate and apply a partial update to a persisted activity
    ///
    /// Only the effective start/end participate in validation; other patch
    /// fields pass through to the store unchanged. Project consistency is
    /// re-checked only when the patch touches project or task.
    pub async fn update(
        &self,
        principal: Option<&Principal>,
        id: Uuid,
        patch: &ActivityPatch,
    ) -> Result<()> {
        let existing = self.store.get(id).await?.ok_or(ScheduleError::NotFound(id))?;

        if !permissions::can_edit(principal, &existing.employee) {
            return Err(ScheduleError::PermissionDenied);
        }

        let start = patch.start.unwrap_or(existing.start);
        let end = patch.end.unwrap_or(existing.end);
        time_range::validate(start, end).map_err(ScheduleError::InvalidRange)?;

        if patch.project.is_some() || patch.task.is_some() {
            let project = patch.project.as_deref().or(existing.project.as_deref());
            let task = patch.task.as_deref().or(existing.task.as_deref());
            self.check_project_consistency(principal, &existing.employee, project, task).await?;
        }

        self.check_overlap(&existing.employee, start, end, Some(id)).await?;

        self.store.update(id, patch).await
    }

    /// Delete a persisted activity
    ///
    /// Deletes skip overlap checking entirely; removing a record cannot
    /// introduce a conflict.
    pub async fn delete(&self, principal: Option<&Principal>, id: Uuid) -> Result<()> {
        let existing = self.store.get(id).await?.ok_or(ScheduleError::NotFound(id))?;

        if !permissions::can_edit(principal, &existing.employee) {
            return Err(ScheduleError::PermissionDenied);
        }

        self.store.delete(id).await
    }

    /// Reject drafts whose task belongs to a different project, and
    /// employee-scoped principals logging time on unassigned projects
    ///
    /// Privileged principals bypass the assignment check but not the
    /// task/project match.
    async fn check_project_consistency(
        &self,
        principal: Option<&Principal>,
        employee: &str,
        project: Option<&str>,
        task: Option<&str>,
    ) -> Result<()> {
        let task_project = match task {
            Some(task) => self.directory.project_of_task(task).await?,
            None => None,
        };

        if let (Some(selected), Some(owning)) = (project, task_project.as_deref()) {
            if selected != owning {
                return Err(ScheduleError::TaskProjectMismatch);
            }
        }

        let effective_project = project.or(task_project.as_deref());
        if let (Some(Principal::EmployeeScoped { .. }), Some(project)) =
            (principal, effective_project)
        {
            let assigned = self.directory.assigned_projects(employee).await?;
            if !assigned.iter().any(|p| p.id == project) {
                return Err(ScheduleError::ProjectNotAssigned);
            }
        }

        Ok(())
    }

    async fn check_overlap(
        &self,
        employee: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<()> {
        let (window_start, window_end) = day_window(start, end);
        let existing = self.store.query(Some(employee), window_start, window_end).await?;

        let candidate = overlap::CandidateSlot { employee, start, end };
        if let Some(conflict) = overlap::find_conflict(&candidate, &existing, exclude_id) {
            return Err(ScheduleError::Overlap {
                conflicting_id: conflict.id.unwrap_or_default(),
            });
        }

        Ok(())
    }

    /// Commit the split records in order
    ///
    /// The saga commits the first record, and only on success attempts the
    /// second. A failure of the second is reported, never rolled back or
    /// retried here.
    async fn commit(&self, records: &[Activity]) -> Result<Vec<Uuid>> {
        let mut created = Vec::with_capacity(records.len());

        for record in records {
            match self.store.create(record).await {
                Ok(id) => created.push(id),
                Err(err) => {
                    if let Some(&committed) = created.first() {
                        error!(
                            %committed,
                            error = %err,
                            "second half of split activity failed to persist"
                        );
                        return Err(ScheduleError::PartialSplit {
                            committed,
                            reason: err.to_string(),
                        });
                    }
                    return Err(err);
                }
            }
        }

        Ok(created)
    }
}

/// Full-day query window covering every activity that can overlap the
/// candidate range
fn day_window(start: DateTime<Utc>, end: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let window_start = start.date_naive().and_time(NaiveTime::MIN).and_utc();
    let window_end = end
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap_or(end.date_naive())
        .and_time(NaiveTime::MIN)
        .and_utc();
    (window_start, window_end)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn day_window_covers_full_days() {
        let start = Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 11, 18, 0, 0).unwrap();

        let (window_start, window_end) = day_window(start, end);
        assert_eq!(window_start, Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap());
        assert_eq!(window_end, Utc.with_ymd_and_hms(2024, 3, 12, 0, 0, 0).unwrap());
    }

    #[test]
    fn day_window_spans_multi_day_ranges() {
        let start = Utc.with_ymd_and_hms(2024, 3, 11, 22, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 12, 6, 0, 0).unwrap();

        let (window_start, window_end) = day_window(start, end);
        assert_eq!(window_start, Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap());
        assert_eq!(window_end, Utc.with_ymd_and_hms(2024, 3, 13, 0, 0, 0).unwrap());
    }
}
