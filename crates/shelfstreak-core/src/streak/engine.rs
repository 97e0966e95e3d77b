//! Daily reading streak state machine.
//!
//! States are "no streak" (no record, or a record without a log date) and
//! "active streak". Logging on the day after the last log continues the
//! streak, logging twice on one day is a no-op, and any other ordering of
//! dates (a gap, or a last log that lies after today because of clock
//! skew) breaks it. A broken streak restarts at one: today's log is the
//! first day of the new run.

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::user::UserId;

use super::record::StreakRecord;

/// Which branch a log took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreakOutcome {
    /// First log for this user.
    Started,
    /// Logged on the day after the previous log.
    Continued,
    /// The previous run ended; the values are the ones held before this log.
    Broken {
        previous_streak: u32,
        highest_streak: u32,
    },
    /// A log already exists for today; nothing changed.
    AlreadyLoggedToday,
}

impl StreakOutcome {
    /// Whether the caller has a new record to persist.
    pub fn changed(&self) -> bool {
        !matches!(self, StreakOutcome::AlreadyLoggedToday)
    }
}

/// Result of [`advance_streak`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakAdvance {
    pub record: StreakRecord,
    pub outcome: StreakOutcome,
}

/// Apply one "log reading" action on `today`.
///
/// Pure and total: every combination of prior state and date yields a
/// record and an outcome.
pub fn advance_streak(
    user_id: &UserId,
    prior: Option<&StreakRecord>,
    today: CalendarDate,
) -> StreakAdvance {
    let Some(prior) = prior else {
        return StreakAdvance {
            record: StreakRecord {
                user_id: user_id.clone(),
                current_streak: 1,
                highest_streak: 1,
                last_log_date: Some(today),
            },
            outcome: StreakOutcome::Started,
        };
    };

    let Some(last) = prior.last_log_date else {
        // A record without a log date never held a dated run.
        return StreakAdvance {
            record: StreakRecord {
                user_id: prior.user_id.clone(),
                current_streak: 1,
                highest_streak: prior.highest_streak.max(1),
                last_log_date: Some(today),
            },
            outcome: StreakOutcome::Started,
        };
    };

    if last == today {
        return StreakAdvance {
            record: prior.clone(),
            outcome: StreakOutcome::AlreadyLoggedToday,
        };
    }

    if last.next_day() == today {
        let current = prior.current_streak.saturating_add(1);
        StreakAdvance {
            record: StreakRecord {
                user_id: prior.user_id.clone(),
                current_streak: current,
                highest_streak: prior.highest_streak.max(current),
                last_log_date: Some(today),
            },
            outcome: StreakOutcome::Continued,
        }
    } else {
        StreakAdvance {
            record: StreakRecord {
                user_id: prior.user_id.clone(),
                current_streak: 1,
                highest_streak: prior.highest_streak.max(1),
                last_log_date: Some(today),
            },
            outcome: StreakOutcome::Broken {
                previous_streak: prior.current_streak,
                highest_streak: prior.highest_streak,
            },
        }
    }
}
