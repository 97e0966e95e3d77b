use std::sync::Arc;

use crate::auth::AdminAllowList;
use crate::catalog::{BookLookup, OpenLibraryClient};
use crate::date::{Clock, SystemClock};
use crate::error::CoreError;
use crate::storage::{Config, Database};

/// Everything a handler needs, passed explicitly on every dispatch.
#[derive(Clone)]
pub struct BotContext {
    pub db: Arc<Database>,
    pub clock: Arc<dyn Clock>,
    pub admins: AdminAllowList,
    pub catalog: Arc<dyn BookLookup>,
    pub config: Config,
}

impl BotContext {
    pub fn new(
        db: Arc<Database>,
        clock: Arc<dyn Clock>,
        catalog: Arc<dyn BookLookup>,
        config: Config,
    ) -> Self {
        Self {
            db,
            clock,
            admins: AdminAllowList::from_config(&config.admin),
            catalog,
            config,
        }
    }

    /// Production wiring: database and Open Library client from `config`,
    /// system clock.
    pub fn from_config(config: Config) -> Result<Self, CoreError> {
        let db = Database::open(&config)?;
        let catalog = OpenLibraryClient::new(&config.catalog)?;
        Ok(Self::new(
            Arc::new(db),
            Arc::new(SystemClock),
            Arc::new(catalog),
            config,
        ))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
