//! Chat command surface.
//!
//! A platform adapter (the CLI, or a chat gateway) turns user input into an
//! [`Invocation`], hands it to the [`Router`] with a [`BotContext`], and
//! renders the returned [`Reply`].

pub mod command;
pub mod context;
pub mod handler;
pub mod handlers;
pub mod reply;

pub use command::{Command, Invocation};
pub use context::BotContext;
pub use handler::{CommandHandler, Router, GENERIC_ERROR};
pub use reply::{Embed, EmbedField, Reply};
