//! Book metadata lookup.
//!
//! Handlers depend on the [`BookLookup`] trait so the network client can be
//! swapped for a canned catalogue in tests.

mod openlibrary;

use async_trait::async_trait;

use crate::error::LookupError;
use crate::library::BookMetadata;

pub use openlibrary::OpenLibraryClient;

/// A source of book metadata keyed by free-text query.
#[async_trait]
pub trait BookLookup: Send + Sync {
    /// Find the best match for `query`. `Ok(None)` means the service had
    /// nothing for it.
    async fn lookup(&self, query: &str) -> Result<Option<BookMetadata>, LookupError>;
}
