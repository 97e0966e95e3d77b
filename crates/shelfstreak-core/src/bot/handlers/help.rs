use async_trait::async_trait;

use crate::bot::command::Invocation;
use crate::bot::context::BotContext;
use crate::bot::handler::CommandHandler;
use crate::bot::reply::{Embed, Reply};
use crate::error::CoreError;

const COMMANDS: &[(&str, &str)] = &[
    ("addbook", "Add a book to your list."),
    ("bookcount", "Check how many books you've read."),
    ("recommend", "Get a book recommendation."),
    ("recommendqueer", "Add a book to the community recommendation list."),
    ("listbooks", "List all books you've read."),
    ("removebook", "Remove a book from your list."),
    ("setgoal", "Set a reading goal."),
    ("progress", "Check your progress toward your goal."),
    ("challenge", "Start a reading challenge."),
    ("streak", "Check your reading streak."),
    ("streakadd", "Log your daily reading to maintain your streak."),
    ("leaderboard", "See the top readers."),
    ("bookclub create", "Create a book club."),
    ("achievements", "View your achievements."),
    ("points", "Check your points."),
    ("funfact", "Get a fun fact about books."),
    ("quote", "Get a quote from a famous book."),
    ("mood", "Get a book recommendation based on your mood."),
    ("profile", "View your reading profile."),
    ("setbio", "Set your profile bio."),
    ("setcolor", "Set your profile color."),
    ("favorite", "Add or remove a book from your favorites."),
];

pub struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    fn commands(&self) -> &'static [&'static str] {
        &["help"]
    }

    async fn handle(&self, _ctx: &BotContext, _invocation: &Invocation) -> Result<Reply, CoreError> {
        let lines = COMMANDS
            .iter()
            .map(|(name, about)| format!("- **/{name}**: {about}"))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Reply::embed(
            Embed::new("Available Commands")
                .description(lines)
                .footer("Happy reading! 📚"),
        ))
    }
}
