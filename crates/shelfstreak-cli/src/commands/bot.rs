use clap::Subcommand;
use std::sync::Arc;

use shelfstreak_core::bot::GENERIC_ERROR;
use shelfstreak_core::{
    BotContext, CalendarDate, Command, Config, FixedClock, Invocation, Router, UserId,
};

/// Who is speaking and how to print the answer.
pub struct Session {
    pub user: String,
    pub guild: String,
    pub json: bool,
    pub today: Option<String>,
}

#[derive(Subcommand)]
pub enum BotCommand {
    /// Add a book to your list
    Addbook { title: String },
    /// Check how many books you've read
    Bookcount,
    /// List all books you've read
    Listbooks,
    /// Remove a book from your list
    Removebook { title: String },
    /// Get a book recommendation
    Recommend,
    /// Add a book to the community recommendation list
    Recommendqueer { query: String },
    /// Set a reading goal
    Setgoal {
        #[arg(allow_negative_numbers = true)]
        goal: i64,
    },
    /// Check your progress toward your goal
    Progress,
    /// Start a reading challenge
    Challenge {
        #[arg(allow_negative_numbers = true)]
        goal: i64,
    },
    /// Check your reading streak
    Streak,
    /// Log your daily reading
    Streakadd,
    /// Set a user's streak (admins only)
    Streakoverride {
        /// Target user id
        target: String,
        #[arg(allow_negative_numbers = true)]
        streak: i64,
    },
    /// See the top readers
    Leaderboard,
    /// Book clubs
    Bookclub {
        #[command(subcommand)]
        action: BookclubAction,
    },
    /// View your achievements
    Achievements,
    /// Check your points
    Points,
    /// Get a fun fact about books
    Funfact,
    /// Get a quote from a famous book
    Quote,
    /// Get a book recommendation based on your mood
    Mood { mood: String },
    /// View your reading profile
    Profile,
    /// Set your profile bio
    Setbio { bio: String },
    /// Set your profile color
    Setcolor { color: String },
    /// Add or remove a book from your favorites
    Favorite { title: String },
    /// List available commands
    Help,
}

#[derive(Subcommand)]
pub enum BookclubAction {
    /// Create a book club
    Create { name: String },
}

impl From<BotCommand> for Command {
    fn from(cmd: BotCommand) -> Self {
        match cmd {
            BotCommand::Addbook { title } => Command::AddBook { title },
            BotCommand::Bookcount => Command::BookCount,
            BotCommand::Listbooks => Command::ListBooks,
            BotCommand::Removebook { title } => Command::RemoveBook { title },
            BotCommand::Recommend => Command::Recommend,
            BotCommand::Recommendqueer { query } => Command::RecommendQueer { query },
            BotCommand::Setgoal { goal } => Command::SetGoal { goal },
            BotCommand::Progress => Command::Progress,
            BotCommand::Challenge { goal } => Command::Challenge { goal },
            BotCommand::Streak => Command::Streak,
            BotCommand::Streakadd => Command::StreakAdd,
            BotCommand::Streakoverride { target, streak } => Command::StreakOverride {
                target: UserId::new(target),
                streak,
            },
            BotCommand::Leaderboard => Command::Leaderboard,
            BotCommand::Bookclub {
                action: BookclubAction::Create { name },
            } => Command::BookClubCreate { name },
            BotCommand::Achievements => Command::Achievements,
            BotCommand::Points => Command::Points,
            BotCommand::Funfact => Command::FunFact,
            BotCommand::Quote => Command::Quote,
            BotCommand::Mood { mood } => Command::Mood { mood },
            BotCommand::Profile => Command::Profile,
            BotCommand::Setbio { bio } => Command::SetBio { bio },
            BotCommand::Setcolor { color } => Command::SetColor { color },
            BotCommand::Favorite { title } => Command::Favorite { title },
            BotCommand::Help => Command::Help,
        }
    }
}

pub async fn run(session: Session, cmd: BotCommand) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut ctx = BotContext::from_config(config)?;
    if let Some(today) = &session.today {
        let today = CalendarDate::parse_iso(today)?;
        ctx = ctx.with_clock(Arc::new(FixedClock(today)));
    }

    let invocation = Invocation::new(session.user, Command::from(cmd)).in_guild(session.guild);
    let reply = Router::with_default_handlers()
        .dispatch(&ctx, &invocation)
        .await;

    if session.json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", reply.render_text());
    }

    if reply.content.as_deref() == Some(GENERIC_ERROR) {
        return Err("command failed; see the log for details".into());
    }
    Ok(())
}
