//! Reading achievements unlocked by shelf milestones.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::books::{primary_genre, ShelfBook};

pub const BOOKWORM_BOOKS: usize = 10;
pub const MARATHON_BOOKS: usize = 50;
pub const EXPLORER_GENRES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    Bookworm,
    MarathonReader,
    GenreExplorer,
}

impl Achievement {
    pub const ALL: [Achievement; 3] = [
        Achievement::Bookworm,
        Achievement::MarathonReader,
        Achievement::GenreExplorer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Achievement::Bookworm => "Bookworm",
            Achievement::MarathonReader => "Marathon Reader",
            Achievement::GenreExplorer => "Genre Explorer",
        }
    }

    pub fn requirement(&self) -> &'static str {
        match self {
            Achievement::Bookworm => "Read 10 books",
            Achievement::MarathonReader => "Read 50 books",
            Achievement::GenreExplorer => "Read books from 5 different genres",
        }
    }
}

/// Unlock flags. Once set, a flag stays set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements {
    pub bookworm: bool,
    pub marathon_reader: bool,
    pub genre_explorer: bool,
}

impl Achievements {
    pub fn has(&self, achievement: Achievement) -> bool {
        match achievement {
            Achievement::Bookworm => self.bookworm,
            Achievement::MarathonReader => self.marathon_reader,
            Achievement::GenreExplorer => self.genre_explorer,
        }
    }

    pub fn unlocked(&self) -> Vec<Achievement> {
        Achievement::ALL.into_iter().filter(|a| self.has(*a)).collect()
    }

    /// Merge in whatever `shelf` now qualifies for and return the
    /// achievements that were newly unlocked.
    pub fn evaluate(&mut self, shelf: &[ShelfBook]) -> Vec<Achievement> {
        let genres: HashSet<String> = shelf
            .iter()
            .map(|b| primary_genre(&b.genre).to_lowercase())
            .filter(|g| !g.is_empty() && g != "unknown genre")
            .collect();

        let before = *self;
        self.bookworm |= shelf.len() >= BOOKWORM_BOOKS;
        self.marathon_reader |= shelf.len() >= MARATHON_BOOKS;
        self.genre_explorer |= genres.len() >= EXPLORER_GENRES;

        Achievement::ALL
            .into_iter()
            .filter(|a| self.has(*a) && !before.has(*a))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelf(n: usize, genres: usize) -> Vec<ShelfBook> {
        (0..n)
            .map(|i| ShelfBook {
                title: format!("Book {i}"),
                author: "Someone".into(),
                genre: format!("Genre {}, Extra", i % genres.max(1)),
            })
            .collect()
    }

    #[test]
    fn bookworm_unlocks_at_ten_books() {
        let mut a = Achievements::default();
        assert!(a.evaluate(&shelf(9, 1)).is_empty());
        assert_eq!(a.evaluate(&shelf(10, 1)), vec![Achievement::Bookworm]);
        assert!(a.bookworm && !a.marathon_reader);
    }

    #[test]
    fn genre_explorer_counts_primary_genres_only() {
        let mut a = Achievements::default();
        let newly = a.evaluate(&shelf(5, 5));
        assert_eq!(newly, vec![Achievement::GenreExplorer]);
    }

    #[test]
    fn unknown_genre_does_not_count() {
        let books: Vec<ShelfBook> = (0..6)
            .map(|i| ShelfBook {
                title: format!("B{i}"),
                author: "A".into(),
                genre: "Unknown Genre".into(),
            })
            .collect();
        let mut a = Achievements::default();
        a.evaluate(&books);
        assert!(!a.genre_explorer);
    }

    #[test]
    fn unlocked_achievements_are_never_revoked() {
        let mut a = Achievements::default();
        a.evaluate(&shelf(50, 5));
        assert_eq!(a.unlocked().len(), 3);
        assert!(a.evaluate(&[]).is_empty());
        assert_eq!(a.unlocked().len(), 3);
    }
}
