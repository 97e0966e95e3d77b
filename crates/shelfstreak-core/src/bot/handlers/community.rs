//! `leaderboard` and `bookclub create`.

use async_trait::async_trait;

use crate::bot::command::{Command, Invocation};
use crate::bot::context::BotContext;
use crate::bot::handler::CommandHandler;
use crate::bot::reply::{Embed, Reply};
use crate::error::{CoreError, ValidationError};
use crate::library::leaderboard::rank;
use crate::library::BookClub;

pub struct CommunityHandler;

#[async_trait]
impl CommandHandler for CommunityHandler {
    fn commands(&self) -> &'static [&'static str] {
        &["leaderboard", "bookclub"]
    }

    async fn handle(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, CoreError> {
        match &invocation.command {
            Command::Leaderboard => {
                let entries = rank(ctx.db.book_counts()?);
                if entries.is_empty() {
                    return Ok(Reply::text("No one has logged any books yet!"));
                }
                let board = entries
                    .iter()
                    .take(ctx.config.leaderboard.limit)
                    .map(|e| format!("{}. {} - {} books", e.rank, e.user_id.mention(), e.books))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(Reply::embed(
                    Embed::new("Top Readers")
                        .description(board)
                        .footer("Keep reading! 📚"),
                ))
            }
            Command::BookClubCreate { name } => {
                let Some(guild_id) = invocation.guild_id.as_deref() else {
                    return Err(ValidationError::invalid(
                        "guild",
                        "Book clubs can only be created inside a server!",
                    )
                    .into());
                };
                let Ok(club) = BookClub::new(guild_id, name, invocation.caller.clone()) else {
                    return Ok(Reply::text("Please provide a name for the book club!"));
                };
                if !ctx.db.create_club(&club)? {
                    return Err(ValidationError::AlreadyExists(
                        "A book club with that name already exists".to_string(),
                    )
                    .into());
                }
                tracing::info!(club = %club.club_id, owner = %club.owner_id, "book club created");
                Ok(Reply::embed(
                    Embed::new("Book Club Created")
                        .description(format!("Book club **{}** created!", club.name))
                        .footer("Happy reading! 📚"),
                ))
            }
            other => Err(CoreError::Custom(format!(
                "community handler cannot run '{}'",
                other.name()
            ))),
        }
    }
}
