//! `funfact`, `quote` and `mood`.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bot::command::{Command, Invocation};
use crate::bot::context::BotContext;
use crate::bot::handler::CommandHandler;
use crate::bot::reply::{Embed, Reply};
use crate::error::CoreError;
use crate::trivia::{random_fact, random_mood_book, random_quote, Mood};

pub struct FunHandler;

#[async_trait]
impl CommandHandler for FunHandler {
    fn commands(&self) -> &'static [&'static str] {
        &["funfact", "quote", "mood"]
    }

    async fn handle(&self, _ctx: &BotContext, invocation: &Invocation) -> Result<Reply, CoreError> {
        let mut rng = StdRng::from_entropy();
        match &invocation.command {
            Command::FunFact => Ok(Reply::embed(
                Embed::new("Did You Know?")
                    .description(random_fact(&mut rng))
                    .footer("Keep reading to learn more! 📚"),
            )),
            Command::Quote => {
                let Some(quote) = random_quote(&mut rng) else {
                    return Err(CoreError::Custom("quote list is empty".into()));
                };
                Ok(Reply::embed(
                    Embed::new("Book Quote")
                        .description(format!("\"{}\"\n\n— **{}**", quote.quote, quote.source))
                        .footer("Keep reading for more inspiration! 📖"),
                ))
            }
            Command::Mood { mood } => {
                let Ok(mood) = mood.parse::<Mood>() else {
                    return Ok(Reply::text(
                        "Please specify a valid mood: happy, sad, or adventurous.",
                    ));
                };
                let Some(book) = random_mood_book(mood, &mut rng) else {
                    return Err(CoreError::Custom(format!("no books for mood {mood}")));
                };
                Ok(Reply::embed(
                    Embed::new("Mood-Based Recommendation")
                        .description(format!("Here's a book for your **{mood}** mood!"))
                        .inline_field("Title", book.title)
                        .inline_field("Author", book.author)
                        .thumbnail(book.cover_url)
                        .footer("Enjoy your reading! 📚"),
                ))
            }
            other => Err(CoreError::Custom(format!(
                "fun handler cannot run '{}'",
                other.name()
            ))),
        }
    }
}
