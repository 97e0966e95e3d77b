//! `setgoal`, `progress` and `challenge`.

use async_trait::async_trait;

use crate::bot::command::{Command, Invocation};
use crate::bot::context::BotContext;
use crate::bot::handler::CommandHandler;
use crate::bot::reply::{Embed, Reply};
use crate::error::{CoreError, DatabaseError};
use crate::goal::{evaluate_progress, ChallengeRecord, Goal, GoalRecord, ProgressResult};
use crate::storage::GoalStore;
use crate::user::UserId;

pub const NO_BOOKS: &str = "You haven't added any books yet!";
const INVALID_GOAL: &str = "Please provide a valid number for your reading goal!";

pub struct GoalHandler;

/// Book count and stored goal for `user_id`, evaluated.
pub fn check_progress<S: GoalStore + ?Sized>(
    store: &S,
    user_id: &UserId,
) -> Result<ProgressResult, CoreError> {
    let books_read = store.book_count(user_id)?;
    let goal = store.load_goal(user_id)?;
    Ok(evaluate_progress(books_read, goal)?)
}

fn save_goal<S: GoalStore + ?Sized>(store: &S, user_id: &UserId, goal: Goal) -> Result<(), DatabaseError> {
    store.save_goal(&GoalRecord {
        user_id: user_id.clone(),
        goal,
    })
}

pub fn progress_reply(result: ProgressResult) -> Reply {
    match result {
        ProgressResult::NoBooksLogged => Reply::text(NO_BOOKS),
        ProgressResult::NoGoalSet => {
            Reply::text("You haven't set a reading goal yet! Use `/setgoal` to set one.")
        }
        ProgressResult::GoalMet { goal } => Reply::embed(
            Embed::new("Goal Achieved!")
                .description(format!(
                    "Congratulations! You've reached your goal of **{goal}** books!"
                ))
                .footer("Keep up the great work! 🎉"),
        ),
        ProgressResult::InProgress {
            books_read,
            goal,
            remaining,
        } => Reply::embed(
            Embed::new("Progress Toward Goal")
                .description(format!(
                    "You've read **{books_read}** books. Only **{remaining}** more to reach your goal of **{goal}**!"
                ))
                .footer("You can do it! 📚"),
        ),
    }
}

#[async_trait]
impl CommandHandler for GoalHandler {
    fn commands(&self) -> &'static [&'static str] {
        &["setgoal", "progress", "challenge"]
    }

    async fn handle(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, CoreError> {
        let caller = &invocation.caller;
        match &invocation.command {
            Command::SetGoal { goal } => {
                let Ok(goal) = Goal::new(*goal) else {
                    return Ok(Reply::text(INVALID_GOAL));
                };
                save_goal(ctx.db.as_ref(), caller, goal)?;
                tracing::info!(user = %caller, goal = goal.get(), "reading goal set");
                Ok(Reply::embed(
                    Embed::new("Reading Goal Set")
                        .description(format!(
                            "Your reading goal for this year is **{}** books!",
                            goal.get()
                        ))
                        .footer("You can do it! 📚"),
                ))
            }
            Command::Progress => Ok(progress_reply(check_progress(ctx.db.as_ref(), caller)?)),
            Command::Challenge { goal } => {
                let Ok(goal) = Goal::new(*goal) else {
                    return Ok(Reply::text(INVALID_GOAL));
                };
                ctx.db
                    .save_challenge(&ChallengeRecord::start(caller.clone(), goal))?;
                Ok(Reply::embed(
                    Embed::new("Reading Challenge Started")
                        .description(format!(
                            "Challenge started! Read **{}** books to complete the challenge.",
                            goal.get()
                        ))
                        .footer("Good luck! 📖"),
                ))
            }
            other => Err(CoreError::Custom(format!(
                "goal handler cannot run '{}'",
                other.name()
            ))),
        }
    }
}
