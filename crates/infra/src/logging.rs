//! Tracing initialisation and logging helpers

use timegrid_domain::ScheduleError;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// The filter honours `RUST_LOG`, defaulting to `info`. Safe to call more
/// than once; repeated initialisation is a no-op so tests can call it
/// freely.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

/// Convert a `ScheduleError` into a stable label suitable for logging.
///
/// Labels carry no user data, so they are safe to forward to dashboards.
#[inline]
pub fn error_label(error: &ScheduleError) -> &'static str {
    match error {
        ScheduleError::PermissionDenied => "permission_denied",
        ScheduleError::InvalidRange(_) => "invalid_range",
        ScheduleError::InvalidBreak(_) => "invalid_break",
        ScheduleError::Overlap { .. } => "overlap",
        ScheduleError::TaskProjectMismatch => "task_project_mismatch",
        ScheduleError::ProjectNotAssigned => "project_not_assigned",
        ScheduleError::NotFound(_) => "not_found",
        ScheduleError::Config(_) => "config",
        ScheduleError::Persistence(_) => "persistence",
        ScheduleError::PartialSplit { .. } => "partial_split",
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
    }

    #[test]
    fn labels_distinguish_partial_split_from_full_failure() {
        let partial = ScheduleError::PartialSplit {
            committed: Uuid::new_v4(),
            reason: "boom".to_string(),
        };
        let full = ScheduleError::Persistence("boom".to_string());

        assert_ne!(error_label(&partial), error_label(&full));
    }
}
