use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Book details as returned by the metadata service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
    pub description: String,
    /// Up to three subjects joined with ", ".
    pub genre: String,
    pub cover_url: String,
}

impl BookMetadata {
    /// The first listed subject, used to count distinct genres.
    pub fn primary_genre(&self) -> &str {
        primary_genre(&self.genre)
    }
}

/// One entry on a reader's shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfBook {
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl From<&BookMetadata> for ShelfBook {
    fn from(book: &BookMetadata) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
        }
    }
}

pub(crate) fn primary_genre(genre: &str) -> &str {
    genre.split(',').next().map(str::trim).unwrap_or("")
}

/// Reject blank free-text arguments.
pub fn require_text(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
