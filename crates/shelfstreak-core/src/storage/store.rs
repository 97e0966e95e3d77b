//! Record-store seams used by the streak and goal handlers.
//!
//! [`super::Database`] implements both traits. Each `save_*` is atomic for
//! its key, `log_streak` is atomic across its two tables, and a load that
//! starts after a save returned observes it.

use crate::error::DatabaseError;
use crate::goal::GoalRecord;
use crate::streak::StreakRecord;
use crate::user::UserId;

pub trait StreakStore: Send + Sync {
    fn load_streak(&self, user_id: &UserId) -> Result<Option<StreakRecord>, DatabaseError>;

    fn save_streak(&self, record: &StreakRecord) -> Result<(), DatabaseError>;

    /// Save `record` and credit `points` to its user. Both writes land or
    /// neither does.
    fn log_streak(&self, record: &StreakRecord, points: i64) -> Result<(), DatabaseError>;
}

/// Inputs of the progress tracker.
pub trait GoalStore: Send + Sync {
    /// The stored goal as written, so a corrupt non-positive value
    /// reaches the tracker's validation instead of being hidden.
    fn load_goal(&self, user_id: &UserId) -> Result<Option<i64>, DatabaseError>;

    fn save_goal(&self, record: &GoalRecord) -> Result<(), DatabaseError>;

    fn book_count(&self, user_id: &UserId) -> Result<u32, DatabaseError>;
}
