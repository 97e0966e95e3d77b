//! Reading streaks: the record, the daily transition and the admin override.

pub mod admin;
pub mod engine;
mod record;

pub use admin::override_streak;
pub use engine::{advance_streak, StreakAdvance, StreakOutcome};
pub use record::StreakRecord;
