//! `streak`, `streakadd` and `streakoverride`.

use async_trait::async_trait;

use crate::bot::command::{Command, Invocation};
use crate::bot::context::BotContext;
use crate::bot::handler::CommandHandler;
use crate::bot::reply::{Embed, Reply, COLOR_ADMIN, COLOR_BROKEN};
use crate::date::CalendarDate;
use crate::error::{CoreError, DatabaseError};
use crate::storage::StreakStore;
use crate::streak::{advance_streak, override_streak, StreakAdvance, StreakOutcome, StreakRecord};
use crate::user::UserId;

pub struct StreakHandler;

/// Load, advance and persist one reading log, crediting `points` when the
/// streak moved.
///
/// The advance is only returned after the store accepted it; on a save
/// error the caller sees the error and neither the record nor the points
/// change.
pub fn record_reading<S: StreakStore + ?Sized>(
    store: &S,
    user_id: &UserId,
    today: CalendarDate,
    points: i64,
) -> Result<StreakAdvance, DatabaseError> {
    let prior = store.load_streak(user_id)?;
    let advance = advance_streak(user_id, prior.as_ref(), today);
    if advance.outcome.changed() {
        store.log_streak(&advance.record, points)?;
    }
    tracing::info!(
        user = %user_id,
        outcome = ?advance.outcome,
        current = advance.record.current_streak,
        highest = advance.record.highest_streak,
        "reading logged"
    );
    Ok(advance)
}

/// Validate, persist and audit an administrative override.
pub fn apply_override<S: StreakStore + ?Sized>(
    store: &S,
    actor: &UserId,
    target: &UserId,
    new_current: i64,
    today: CalendarDate,
) -> Result<StreakRecord, CoreError> {
    let prior = store.load_streak(target)?;
    let record = override_streak(target, prior.as_ref(), new_current, today)?;
    store.save_streak(&record)?;
    tracing::warn!(
        actor = %actor,
        target = %target,
        streak = record.current_streak,
        highest = record.highest_streak,
        "ADMIN ACTION: streak override"
    );
    Ok(record)
}

pub fn advance_reply(advance: &StreakAdvance) -> Reply {
    match advance.outcome {
        StreakOutcome::AlreadyLoggedToday => {
            Reply::text("You've already logged your reading for today!")
        }
        StreakOutcome::Started => Reply::embed(
            Embed::new("Reading Streak Started")
                .description(format!(
                    "You've started a reading streak! Current streak: **{}** day.",
                    advance.record.current_streak
                ))
                .footer("Use /streakadd tomorrow to keep your streak going! 📚"),
        ),
        StreakOutcome::Continued => Reply::embed(
            Embed::new("Reading Streak Updated")
                .description(format!(
                    "Your current reading streak is now **{}** days!",
                    advance.record.current_streak
                ))
                .footer("Keep it up! 📚"),
        ),
        StreakOutcome::Broken {
            previous_streak,
            highest_streak,
        } => Reply::embed(
            Embed::new("Streak Broken")
                .color(COLOR_BROKEN)
                .description(format!(
                    "Your reading streak of **{previous_streak}** days was broken!"
                ))
                .field("Highest Streak", format!("{highest_streak} days"))
                .footer("Start a new streak today! 📚"),
        ),
    }
}

fn status_reply(record: Option<&StreakRecord>) -> Reply {
    let Some(record) = record else {
        return Reply::text(
            "You haven't started a reading streak yet. Use `/streakadd` to start your streak!",
        );
    };
    let last_read = record
        .last_log_date
        .map(|d| d.to_iso_string())
        .unwrap_or_else(|| "Never".to_string());
    Reply::embed(
        Embed::new("Reading Streak")
            .description(format!(
                "Your current reading streak is **{}** days!",
                record.current_streak
            ))
            .inline_field("Highest Streak", format!("{} days", record.highest_streak))
            .inline_field("Last Read", last_read)
            .footer("Keep it up! Use /streakadd to log your daily reading. 📚"),
    )
}

#[async_trait]
impl CommandHandler for StreakHandler {
    fn commands(&self) -> &'static [&'static str] {
        &["streak", "streakadd", "streakoverride"]
    }

    async fn handle(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, CoreError> {
        let caller = &invocation.caller;
        match &invocation.command {
            Command::Streak => {
                let record = ctx.db.load_streak(caller)?;
                Ok(status_reply(record.as_ref()))
            }
            Command::StreakAdd => {
                let today = ctx.clock.today();
                let points = ctx.config.points.per_streak_day;
                let advance = record_reading(ctx.db.as_ref(), caller, today, points)?;
                Ok(advance_reply(&advance))
            }
            Command::StreakOverride { target, streak } => {
                if !ctx.admins.is_authorized(caller) {
                    tracing::warn!(caller = %caller, target = %target, "unauthorized streak override");
                    return Ok(
                        Reply::text("You don't have permission to use this command.").ephemeral(),
                    );
                }
                let today = ctx.clock.today();
                match apply_override(ctx.db.as_ref(), caller, target, *streak, today) {
                    Ok(record) => Ok(Reply::embed(
                        Embed::new("Streak Override")
                            .color(COLOR_ADMIN)
                            .description(format!(
                                "Successfully set {}'s streak to **{}** days.",
                                target.mention(),
                                record.current_streak
                            ))
                            .footer("Admin command executed"),
                    )),
                    Err(CoreError::Validation(_)) => Ok(Reply::text(
                        "Please mention a user and provide a valid streak number.",
                    )
                    .ephemeral()),
                    Err(err) => Err(err),
                }
            }
            other => Err(CoreError::Custom(format!(
                "streak handler cannot run '{}'",
                other.name()
            ))),
        }
    }
}
