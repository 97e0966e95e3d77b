//! # Shelfstreak Core Library
//!
//! Business logic for a reading-tracker chat bot. Everything the bot can do
//! is available through this crate; the `shelfstreak-cli` binary and any
//! chat gateway are thin adapters over the same [`Router`].
//!
//! ## Architecture
//!
//! - **Streak engine**: a pure daily state machine ([`advance_streak`]) plus
//!   an administrative override ([`override_streak`])
//! - **Goal tracker**: [`evaluate_progress`] compares a shelf size with a
//!   stored yearly goal
//! - **Storage**: SQLite record store and TOML configuration
//! - **Catalog**: book metadata lookup against Open Library
//! - **Bot**: typed commands, a name-keyed router and platform-neutral replies
//!
//! ## Key Components
//!
//! - [`Database`]: per-user records behind [`StreakStore`] and [`GoalStore`]
//! - [`Config`]: application configuration management
//! - [`BotContext`]: store, clock, allow-list and catalog handed to handlers

pub mod auth;
pub mod bot;
pub mod catalog;
pub mod date;
pub mod error;
pub mod goal;
pub mod library;
pub mod logging;
pub mod storage;
pub mod streak;
pub mod trivia;
pub mod user;

pub use auth::AdminAllowList;
pub use bot::{BotContext, Command, Invocation, Reply, Router};
pub use catalog::{BookLookup, OpenLibraryClient};
pub use date::{CalendarDate, Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, LookupError, ValidationError};
pub use goal::{evaluate_progress, Goal, ProgressResult};
pub use storage::{Config, Database, GoalStore, StreakStore};
pub use streak::{advance_streak, override_streak, StreakAdvance, StreakOutcome, StreakRecord};
pub use user::UserId;
