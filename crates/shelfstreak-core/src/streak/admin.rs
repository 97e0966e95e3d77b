//! Administrative streak override.
//!
//! Sets a user's current streak directly, skipping date continuity. The
//! highest streak only ever moves up. Authorization is checked by the
//! caller against [`crate::auth::AdminAllowList`].

use crate::date::CalendarDate;
use crate::error::ValidationError;
use crate::user::UserId;

use super::record::StreakRecord;

/// Overwrite the current streak of `user_id` with `new_current`.
///
/// # Errors
/// Returns [`ValidationError::InvalidArgument`] when `new_current` is
/// negative or does not fit a streak counter.
pub fn override_streak(
    user_id: &UserId,
    prior: Option<&StreakRecord>,
    new_current: i64,
    today: CalendarDate,
) -> Result<StreakRecord, ValidationError> {
    if new_current < 0 {
        return Err(ValidationError::invalid(
            "streak",
            format!("must be zero or greater, got {new_current}"),
        ));
    }
    let new_current = u32::try_from(new_current).map_err(|_| {
        ValidationError::invalid("streak", format!("{new_current} is too large"))
    })?;

    let existing_highest = prior.map(|r| r.highest_streak).unwrap_or(0);

    Ok(StreakRecord {
        user_id: user_id.clone(),
        current_streak: new_current,
        highest_streak: existing_highest.max(new_current),
        last_log_date: Some(today),
    })
}
