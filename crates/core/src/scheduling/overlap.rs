//! Overlap detection for candidate activities

use chrono::{DateTime, Utc};
use timegrid_domain::Activity;
use uuid::Uuid;

/// A candidate time slot to test against existing activities
#[derive(Debug, Clone)]
pub struct CandidateSlot<'a> {
    pub employee: &'a str,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Find the first existing activity conflicting with the candidate
///
/// Overlap is scoped per employee; activities of other employees never
/// conflict. Records whose id equals `exclude_id` are skipped so an update
/// does not collide with itself. Intervals are half-open: `[s1, e1)` and
/// `[s2, e2)` conflict iff `s1 < e2 && e1 > s2`, so touching endpoints do
/// not conflict. The first match in sequence order wins; the caller
/// controls the ordering.
pub fn find_conflict<'a>(
    candidate: &CandidateSlot<'_>,
    existing: &'a [Activity],
    exclude_id: Option<Uuid>,
) -> Option<&'a Activity> {
    existing.iter().find(|activity| {
        if activity.id.is_some() && activity.id == exclude_id {
            return false;
        }
        if activity.employee != candidate.employee {
            return false;
        }
        candidate.start < activity.end && candidate.end > activity.start
    })
}
