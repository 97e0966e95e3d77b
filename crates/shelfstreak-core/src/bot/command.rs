//! Parsed chat commands.

use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// One slash command with its arguments.
///
/// Numeric arguments stay as `i64` so range checks happen in the domain
/// types, the same way they would for a value typed into chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    AddBook { title: String },
    BookCount,
    ListBooks,
    RemoveBook { title: String },
    Recommend,
    RecommendQueer { query: String },
    SetGoal { goal: i64 },
    Progress,
    Challenge { goal: i64 },
    Streak,
    StreakAdd,
    StreakOverride { target: UserId, streak: i64 },
    Leaderboard,
    BookClubCreate { name: String },
    Achievements,
    Points,
    FunFact,
    Quote,
    Mood { mood: String },
    Profile,
    SetBio { bio: String },
    SetColor { color: String },
    Favorite { title: String },
    Help,
}

impl Command {
    /// Router key. Matches the chat command name.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddBook { .. } => "addbook",
            Command::BookCount => "bookcount",
            Command::ListBooks => "listbooks",
            Command::RemoveBook { .. } => "removebook",
            Command::Recommend => "recommend",
            Command::RecommendQueer { .. } => "recommendqueer",
            Command::SetGoal { .. } => "setgoal",
            Command::Progress => "progress",
            Command::Challenge { .. } => "challenge",
            Command::Streak => "streak",
            Command::StreakAdd => "streakadd",
            Command::StreakOverride { .. } => "streakoverride",
            Command::Leaderboard => "leaderboard",
            Command::BookClubCreate { .. } => "bookclub",
            Command::Achievements => "achievements",
            Command::Points => "points",
            Command::FunFact => "funfact",
            Command::Quote => "quote",
            Command::Mood { .. } => "mood",
            Command::Profile => "profile",
            Command::SetBio { .. } => "setbio",
            Command::SetColor { .. } => "setcolor",
            Command::Favorite { .. } => "favorite",
            Command::Help => "help",
        }
    }
}

/// A command together with who issued it and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub caller: UserId,
    /// Server the command was issued in; `None` for direct messages.
    pub guild_id: Option<String>,
    pub command: Command,
}

impl Invocation {
    pub fn new(caller: impl Into<UserId>, command: Command) -> Self {
        Self {
            caller: caller.into(),
            guild_id: None,
            command,
        }
    }

    pub fn in_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }
}
