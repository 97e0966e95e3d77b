//! Shelf commands and the community recommendation list.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::goal::NO_BOOKS;
use crate::bot::command::{Command, Invocation};
use crate::bot::context::BotContext;
use crate::bot::handler::CommandHandler;
use crate::bot::reply::{Embed, Reply};
use crate::error::CoreError;
use crate::library::books::require_text;
use crate::library::{Achievement, BookMetadata, ShelfBook};
use crate::storage::GoalStore;
use crate::user::UserId;

const NOT_FOUND: &str =
    "Could not find the book. Please try again with a different title or author.";

pub struct ShelfHandler;

/// Look a title up, treating service failures like a miss.
async fn find_book(ctx: &BotContext, query: &str) -> Option<BookMetadata> {
    match ctx.catalog.lookup(query).await {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(query, error = %err, "book lookup failed");
            None
        }
    }
}

/// Put `book` on the shelf, award points and return newly unlocked
/// achievements alongside the new shelf size.
pub fn shelve(
    ctx: &BotContext,
    user_id: &UserId,
    book: &ShelfBook,
) -> Result<(u32, Vec<Achievement>), CoreError> {
    let (count, unlocked) = ctx.db.shelve_book(user_id, book, ctx.config.points.per_book)?;
    if !unlocked.is_empty() {
        tracing::info!(user = %user_id, ?unlocked, "achievements unlocked");
    }
    Ok((count, unlocked))
}

#[async_trait]
impl CommandHandler for ShelfHandler {
    fn commands(&self) -> &'static [&'static str] {
        &[
            "addbook",
            "bookcount",
            "listbooks",
            "removebook",
            "recommend",
            "recommendqueer",
        ]
    }

    async fn handle(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, CoreError> {
        let caller = &invocation.caller;
        match &invocation.command {
            Command::AddBook { title } => {
                let Ok(title) = require_text("title", title) else {
                    return Ok(Reply::text("Please provide a book name!"));
                };
                let Some(book) = find_book(ctx, &title).await else {
                    return Ok(Reply::text(NOT_FOUND));
                };

                let (_, unlocked) = shelve(ctx, caller, &ShelfBook::from(&book))?;
                let mut embed = Embed::new("Book Added")
                    .description(format!("Added \"{}\" to your list!", book.title))
                    .inline_field("Author", &book.author)
                    .inline_field("Genre", &book.genre)
                    .thumbnail(&book.cover_url)
                    .footer("Happy reading! 📚");
                if !unlocked.is_empty() {
                    let names: Vec<&str> = unlocked.iter().map(|a| a.name()).collect();
                    embed = embed.field("Achievement Unlocked", names.join("\n"));
                }
                Ok(Reply::embed(embed))
            }
            Command::BookCount => {
                let count = ctx.db.book_count(caller)?;
                if count == 0 {
                    return Ok(Reply::text(NO_BOOKS));
                }
                Ok(Reply::embed(
                    Embed::new("Your Reading Progress")
                        .description(format!("You've read **{count}** books so far!"))
                        .footer("Keep up the great work! 📖"),
                ))
            }
            Command::ListBooks => {
                let shelf = ctx.db.shelf(caller)?;
                if shelf.is_empty() {
                    return Ok(Reply::text(NO_BOOKS));
                }
                let list = shelf
                    .iter()
                    .enumerate()
                    .map(|(i, book)| format!("{}. {}", i + 1, book.title))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(Reply::embed(
                    Embed::new("Your Reading List")
                        .description(format!("Here are the books you've read:\n{list}"))
                        .footer("Keep reading! 📚"),
                ))
            }
            Command::RemoveBook { title } => {
                let Ok(title) = require_text("title", title) else {
                    return Ok(Reply::text("Please provide a book name!"));
                };
                if ctx.db.book_count(caller)? == 0 {
                    return Ok(Reply::text(NO_BOOKS));
                }
                let Some(remaining) = ctx.db.remove_book(caller, &title)? else {
                    return Ok(Reply::text(format!("\"{title}\" is not in your list!")));
                };
                Ok(Reply::embed(
                    Embed::new("Book Removed")
                        .description(format!("Removed \"{title}\" from your list!"))
                        .inline_field("Total Books Read", remaining.to_string())
                        .footer("Keep up the great work! 📖"),
                ))
            }
            Command::Recommend => {
                let books = ctx.db.recommendations()?;
                let pick = books.choose(&mut StdRng::from_entropy()).cloned();
                let Some(book) = pick else {
                    return Ok(Reply::text(
                        "No queer books available for recommendation. Use `/recommendqueer` to add some!",
                    ));
                };
                Ok(Reply::embed(
                    Embed::new("Queer Book Recommendation")
                        .description("Here's a recommendation for you!")
                        .inline_field("Title", book.title)
                        .inline_field("Author", book.author)
                        .inline_field("Genre", book.genre)
                        .field("Description", book.description)
                        .image(book.cover_url)
                        .footer("Enjoy your reading! 🌈"),
                ))
            }
            Command::RecommendQueer { query } => {
                let Ok(query) = require_text("title", query) else {
                    return Ok(Reply::text("Please provide a book title or author!"));
                };
                let Some(book) = find_book(ctx, &query).await else {
                    return Ok(Reply::text(NOT_FOUND));
                };
                ctx.db.add_recommendation(&book)?;
                Ok(Reply::embed(
                    Embed::new("Queer Book Added")
                        .description(format!(
                            "Added \"{}\" by {} to the queer books list!",
                            book.title, book.author
                        ))
                        .inline_field("Genre", &book.genre)
                        .field("Description", &book.description)
                        .thumbnail(&book.cover_url)
                        .footer("Thank you for contributing! 📚"),
                ))
            }
            other => Err(CoreError::Custom(format!(
                "shelf handler cannot run '{}'",
                other.name()
            ))),
        }
    }
}
