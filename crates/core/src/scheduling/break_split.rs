//! Break decomposition
//!
//! A draft carrying a break window is persisted as two activities, one on
//! each side of the break. The split is computed here; the scheduler
//! commits the halves in order.

use chrono::{DateTime, Utc};
use timegrid_domain::{Activity, ActivityDraft, BreakViolation};

/// Decompose a draft into the activities to persist
///
/// Without a break the draft maps to a single activity. With one, the
/// break times-of-day are resolved onto the calendar date of the draft's
/// start and must satisfy `start <= break_start < break_end <= end`. The
/// first half always precedes the second in the returned sequence, and
/// both inherit every non-time field of the draft.
///
/// # Errors
/// - `BreakViolation::OutOfRange` when the window falls outside the
///   activity range
/// - `BreakViolation::EndNotAfterStart` when the window is not ascending
/// - `BreakViolation::DegenerateSegment` when either half would be empty
///   (the break touches the activity boundary); nothing is silently
///   dropped
pub fn split(draft: &ActivityDraft) -> Result<Vec<Activity>, BreakViolation> {
    let Some(window) = draft.break_window else {
        return Ok(vec![draft.to_activity()]);
    };

    let date = draft.start.date_naive();
    let break_start: DateTime<Utc> = date.and_time(window.start).and_utc();
    let break_end: DateTime<Utc> = date.and_time(window.end).and_utc();

    if break_start < draft.start || break_end > draft.end {
        return Err(BreakViolation::OutOfRange);
    }
    if break_end <= break_start {
        return Err(BreakViolation::EndNotAfterStart);
    }
    if break_start == draft.start || break_end == draft.end {
        return Err(BreakViolation::DegenerateSegment);
    }

    let mut first = draft.to_activity();
    first.end = break_start;

    let mut second = draft.to_activity();
    second.start = break_end;

    Ok(vec![first, second])
}
