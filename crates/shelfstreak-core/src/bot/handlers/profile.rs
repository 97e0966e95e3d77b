//! Profile, achievements and points.

use async_trait::async_trait;

use super::goal::NO_BOOKS;
use crate::bot::command::{Command, Invocation};
use crate::bot::context::BotContext;
use crate::bot::handler::CommandHandler;
use crate::bot::reply::{Embed, Reply};
use crate::error::CoreError;
use crate::library::books::require_text;
use crate::library::leaderboard::rank;
use crate::library::{ProfileColor, UserProfile};
use crate::storage::{GoalStore, StreakStore};
use crate::user::UserId;

pub struct ProfileHandler;

fn load_or_new_profile(ctx: &BotContext, user_id: &UserId) -> Result<UserProfile, CoreError> {
    if let Some(profile) = ctx.db.load_profile(user_id)? {
        return Ok(profile);
    }
    let color = ctx
        .config
        .profile
        .default_color
        .parse()
        .unwrap_or_else(|_| ProfileColor::default());
    Ok(UserProfile::new(user_id.clone(), color))
}

fn days_or_none(days: u32) -> String {
    if days == 0 {
        "No streak yet!".to_string()
    } else {
        format!("{days} days")
    }
}

fn profile_reply(ctx: &BotContext, user_id: &UserId) -> Result<Reply, CoreError> {
    let books = ctx.db.book_count(user_id)?;
    if books == 0 {
        return Ok(Reply::text(NO_BOOKS));
    }
    let profile = load_or_new_profile(ctx, user_id)?;
    let position = rank(ctx.db.book_counts()?)
        .into_iter()
        .find(|entry| &entry.user_id == user_id)
        .map(|entry| entry.rank)
        .unwrap_or_default();
    let streak = ctx.db.load_streak(user_id)?;
    let (current, highest) = streak
        .map(|s| (s.current_streak, s.highest_streak))
        .unwrap_or((0, 0));
    let achievements = ctx
        .db
        .load_achievements(user_id)?
        .unwrap_or_default()
        .unlocked();

    let bio = if profile.bio.is_empty() {
        "No bio set.".to_string()
    } else {
        profile.bio.clone()
    };
    let favorites = if profile.favorite_books.is_empty() {
        "No favorites yet!".to_string()
    } else {
        profile.favorite_books.join("\n")
    };
    let unlocked = if achievements.is_empty() {
        "No achievements yet!".to_string()
    } else {
        achievements
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(Reply::embed(
        Embed::new(format!("{}'s Profile", user_id.mention()))
            .color(profile.color.as_str())
            .description(bio)
            .inline_field("Books Read", books.to_string())
            .inline_field("Leaderboard Position", format!("#{position}"))
            .inline_field("Reading Streak", days_or_none(current))
            .inline_field("Highest Streak", days_or_none(highest))
            .field("Favorite Books", favorites)
            .field("Achievements", unlocked)
            .footer("Keep reading to grow your profile! 📚"),
    ))
}

#[async_trait]
impl CommandHandler for ProfileHandler {
    fn commands(&self) -> &'static [&'static str] {
        &["profile", "setbio", "setcolor", "favorite", "achievements", "points"]
    }

    async fn handle(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, CoreError> {
        let caller = &invocation.caller;
        match &invocation.command {
            Command::Profile => profile_reply(ctx, caller),
            Command::SetBio { bio } => {
                let Ok(bio) = require_text("bio", bio) else {
                    return Ok(Reply::text("Please provide a bio!"));
                };
                let mut profile = load_or_new_profile(ctx, caller)?;
                profile.bio = bio;
                ctx.db.save_profile(&profile)?;
                Ok(Reply::text("Your bio has been updated!"))
            }
            Command::SetColor { color } => {
                let Ok(color) = color.trim().parse::<ProfileColor>() else {
                    return Ok(Reply::text("Please provide a valid hex color (e.g., #800080)!"));
                };
                let mut profile = load_or_new_profile(ctx, caller)?;
                profile.color = color;
                ctx.db.save_profile(&profile)?;
                Ok(Reply::text(format!(
                    "Your profile color has been updated to {}!",
                    profile.color
                )))
            }
            Command::Favorite { title } => {
                let Ok(title) = require_text("title", title) else {
                    return Ok(Reply::text(
                        "Please provide a book name to add to your favorites!",
                    ));
                };
                let on_shelf = ctx.db.shelf(caller)?.iter().any(|b| b.title == title);
                if !on_shelf {
                    return Ok(Reply::text(format!("\"{title}\" is not in your read list!")));
                }
                let mut profile = load_or_new_profile(ctx, caller)?;
                let added = profile.toggle_favorite(&title);
                ctx.db.save_profile(&profile)?;
                if added {
                    Ok(Reply::text(format!("Added \"{title}\" to your favorites!")))
                } else {
                    Ok(Reply::text(format!("Removed \"{title}\" from your favorites!")))
                }
            }
            Command::Achievements => {
                let unlocked = ctx
                    .db
                    .load_achievements(caller)?
                    .unwrap_or_default()
                    .unlocked();
                if unlocked.is_empty() {
                    return Ok(Reply::text("You haven't unlocked any achievements yet!"));
                }
                let lines = unlocked
                    .iter()
                    .map(|a| format!("- {}: {}", a.name(), a.requirement()))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(Reply::embed(
                    Embed::new("Your Achievements")
                        .description(lines)
                        .footer("Keep reading to unlock more! 📚"),
                ))
            }
            Command::Points => match ctx.db.points(caller)? {
                Some(points) => Ok(Reply::embed(
                    Embed::new("Your Points")
                        .description(format!("You have **{points}** points!"))
                        .footer("Keep earning points! 📚"),
                )),
                None => Ok(Reply::text("You haven't earned any points yet!")),
            },
            other => Err(CoreError::Custom(format!(
                "profile handler cannot run '{}'",
                other.name()
            ))),
        }
    }
}
