use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::user::UserId;

/// Persisted streak state of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub user_id: UserId,
    /// Consecutive logged days ending at `last_log_date`.
    pub current_streak: u32,
    /// Longest streak ever held. Never below `current_streak` after a
    /// normal transition.
    pub highest_streak: u32,
    /// Most recent successful log, `None` if the user never logged.
    pub last_log_date: Option<CalendarDate>,
}

impl StreakRecord {
    /// The implicit record of a user who has never logged.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            current_streak: 0,
            highest_streak: 0,
            last_log_date: None,
        }
    }

    pub fn holds_invariant(&self) -> bool {
        self.highest_streak >= self.current_streak
    }
}
