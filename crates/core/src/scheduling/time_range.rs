//! Time range validation

use chrono::{DateTime, Duration, Utc};
use timegrid_domain::constants::MAX_ACTIVITY_DURATION_HOURS;
use timegrid_domain::RangeViolation;

/// Validate a proposed activity time range
///
/// Rules, in order: the end must be strictly after the start, and the
/// duration must not exceed 24 hours. Exactly 24 hours is accepted; the
/// cap is strictly greater-than.
pub fn validate(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), RangeViolation> {
    if end <= start {
        return Err(RangeViolation::EndBeforeStart);
    }

    if end - start > Duration::hours(MAX_ACTIVITY_DURATION_HOURS) {
        return Err(RangeViolation::DurationTooLong);
    }

    Ok(())
}
