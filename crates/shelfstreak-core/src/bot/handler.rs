//! Command dispatch.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::command::Invocation;
use super::context::BotContext;
use super::handlers;
use super::reply::Reply;
use crate::error::CoreError;

pub const GENERIC_ERROR: &str = "An error occurred while processing your command.";

/// Handles one or more commands.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command names this handler answers to.
    fn commands(&self) -> &'static [&'static str];

    async fn handle(&self, ctx: &BotContext, invocation: &Invocation) -> Result<Reply, CoreError>;
}

/// Maps command names to handlers.
#[derive(Default)]
pub struct Router {
    handlers: HashMap<&'static str, Arc<dyn CommandHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// A router with every built-in command registered.
    pub fn with_default_handlers() -> Self {
        let mut router = Self::new();
        router.register(Arc::new(handlers::StreakHandler));
        router.register(Arc::new(handlers::GoalHandler));
        router.register(Arc::new(handlers::ShelfHandler));
        router.register(Arc::new(handlers::ProfileHandler));
        router.register(Arc::new(handlers::CommunityHandler));
        router.register(Arc::new(handlers::FunHandler));
        router.register(Arc::new(handlers::HelpHandler));
        router
    }

    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        for &name in handler.commands() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    /// Run `invocation` and always produce a reply.
    ///
    /// Validation failures become a message to the caller only. Any other
    /// failure is logged and answered with [`GENERIC_ERROR`].
    pub async fn dispatch(&self, ctx: &BotContext, invocation: &Invocation) -> Reply {
        let name = invocation.command.name();
        let Some(handler) = self.handlers.get(name) else {
            tracing::warn!(command = name, "no handler registered");
            return Reply::text(format!("Unknown command: {name}")).ephemeral();
        };

        tracing::debug!(command = name, caller = %invocation.caller, "dispatching");
        match handler.handle(ctx, invocation).await {
            Ok(reply) => reply,
            Err(CoreError::Validation(err)) => {
                tracing::debug!(command = name, error = %err, "rejected");
                Reply::text(err.to_string()).ephemeral()
            }
            Err(err) => {
                tracing::error!(command = name, caller = %invocation.caller, error = %err, "command failed");
                Reply::text(GENERIC_ERROR).ephemeral()
            }
        }
    }
}
