use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::user::UserId;

use super::books::require_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookClub {
    pub club_id: String,
    pub name: String,
    pub owner_id: UserId,
}

impl BookClub {
    /// A club scoped to `guild_id`. The id is the guild id and the
    /// lowercased name with spaces replaced by dashes.
    pub fn new(guild_id: &str, name: &str, owner_id: UserId) -> Result<Self, ValidationError> {
        let name = require_text("name", name)?;
        let club_id = format!("{}-{}", guild_id, name.to_lowercase().replace(' ', "-"));
        Ok(Self {
            club_id,
            name,
            owner_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn club_id_is_guild_scoped_slug() {
        let club = BookClub::new("42", "Night Owls Read", UserId::new("u")).unwrap();
        assert_eq!(club.club_id, "42-night-owls-read");
        assert_eq!(club.name, "Night Owls Read");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(BookClub::new("42", "  ", UserId::new("u")).is_err());
    }
}
