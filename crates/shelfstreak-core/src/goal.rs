//! Reading goals, progress evaluation and reading challenges.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::user::UserId;

/// A positive target number of books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Goal(u32);

impl Goal {
    /// # Errors
    /// Returns [`ValidationError::InvalidArgument`] for zero, negative or
    /// oversized targets.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::invalid(
                "goal",
                format!("must be a positive number of books, got {value}"),
            ));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::invalid("goal", format!("{value} is too large")))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// A user's yearly reading goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub user_id: UserId,
    pub goal: Goal,
}

/// A user's reading challenge. Progress starts at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    pub user_id: UserId,
    pub goal: Goal,
    pub progress: u32,
}

impl ChallengeRecord {
    pub fn start(user_id: UserId, goal: Goal) -> Self {
        Self {
            user_id,
            goal,
            progress: 0,
        }
    }
}

/// Where a reader stands against their goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressResult {
    NoBooksLogged,
    NoGoalSet,
    GoalMet { goal: u32 },
    InProgress { books_read: u32, goal: u32, remaining: u32 },
}

/// Compare a book count with an optional stored goal.
///
/// A reader with no books is told so before being told they lack a goal.
///
/// # Errors
/// Returns [`ValidationError::InvalidArgument`] if a stored goal is not
/// positive.
pub fn evaluate_progress(books_read: u32, goal: Option<i64>) -> Result<ProgressResult, ValidationError> {
    let goal = goal.map(Goal::new).transpose()?;

    if books_read == 0 {
        return Ok(ProgressResult::NoBooksLogged);
    }
    let Some(goal) = goal else {
        return Ok(ProgressResult::NoGoalSet);
    };

    let target = goal.get();
    if books_read >= target {
        Ok(ProgressResult::GoalMet { goal: target })
    } else {
        Ok(ProgressResult::InProgress {
            books_read,
            goal: target,
            remaining: target - books_read,
        })
    }
}
