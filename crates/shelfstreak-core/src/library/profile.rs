//! Reader profiles: bio, accent colour and favourite books.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::user::UserId;

pub const DEFAULT_PROFILE_COLOR: &str = "#800080";

/// A `#rrggbb` colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileColor(String);

impl ProfileColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProfileColor {
    fn default() -> Self {
        Self(DEFAULT_PROFILE_COLOR.to_string())
    }
}

impl FromStr for ProfileColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or("");
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationError::invalid(
                "color",
                "Please provide a valid hex color (e.g., #800080)!",
            ))
        }
    }
}

impl TryFrom<String> for ProfileColor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProfileColor> for String {
    fn from(color: ProfileColor) -> Self {
        color.0
    }
}

impl fmt::Display for ProfileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub favorite_books: Vec<String>,
    pub bio: String,
    pub color: ProfileColor,
}

impl UserProfile {
    pub fn new(user_id: UserId, color: ProfileColor) -> Self {
        Self {
            user_id,
            favorite_books: Vec::new(),
            bio: String::new(),
            color,
        }
    }

    /// Add `title` to favourites, or remove it if already there.
    /// Returns `true` when the title was added.
    pub fn toggle_favorite(&mut self, title: &str) -> bool {
        if let Some(pos) = self.favorite_books.iter().position(|b| b == title) {
            self.favorite_books.remove(pos);
            false
        } else {
            self.favorite_books.push(title.to_string());
            true
        }
    }
}
