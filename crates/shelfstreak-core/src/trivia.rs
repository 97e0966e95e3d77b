//! Static trivia: fun facts, quotes and mood picks.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub const FUN_FACTS: &[&str] = &[
    "The longest sentence ever printed is in Victor Hugo's 'Les Misérables' and contains 823 words.",
    "J.K. Rowling was rejected by 12 publishers before 'Harry Potter' was accepted.",
    "The smallest book in the world is 'Teeny Ted from Turnip Town' and measures 0.07 mm x 0.10 mm.",
    "The first book ever written on a typewriter is 'The Adventures of Tom Sawyer' by Mark Twain.",
    "The most expensive book ever sold is Leonardo da Vinci's 'Codex Leicester,' which sold for $30.8 million.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookQuote {
    pub quote: &'static str,
    pub source: &'static str,
}

pub const BOOK_QUOTES: &[BookQuote] = &[
    BookQuote {
        quote: "So we beat on, boats against the current, borne back ceaselessly into the past.",
        source: "The Great Gatsby by F. Scott Fitzgerald",
    },
    BookQuote {
        quote: "All we have to decide is what to do with the time that is given us.",
        source: "The Lord of the Rings by J.R.R. Tolkien",
    },
    BookQuote {
        quote: "It is our choices, Harry, that show what we truly are, far more than our abilities.",
        source: "Harry Potter and the Chamber of Secrets by J.K. Rowling",
    },
    BookQuote {
        quote: "The only way out of the labyrinth of suffering is to forgive.",
        source: "Looking for Alaska by John Green",
    },
    BookQuote {
        quote: "We accept the love we think we deserve.",
        source: "The Perks of Being a Wallflower by Stephen Chbosky",
    },
];

const MOOD_COVER: &str = "https://covers.openlibrary.org/b/id/8400381-L.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodBook {
    pub title: &'static str,
    pub author: &'static str,
    pub cover_url: &'static str,
}

const HAPPY: &[MoodBook] = &[
    MoodBook {
        title: "The Hitchhiker's Guide to the Galaxy",
        author: "Douglas Adams",
        cover_url: MOOD_COVER,
    },
    MoodBook {
        title: "Bridget Jones's Diary",
        author: "Helen Fielding",
        cover_url: MOOD_COVER,
    },
];

const SAD: &[MoodBook] = &[
    MoodBook {
        title: "The Book Thief",
        author: "Markus Zusak",
        cover_url: MOOD_COVER,
    },
    MoodBook {
        title: "A Little Life",
        author: "Hanya Yanagihara",
        cover_url: MOOD_COVER,
    },
];

const ADVENTUROUS: &[MoodBook] = &[
    MoodBook {
        title: "The Hobbit",
        author: "J.R.R. Tolkien",
        cover_url: MOOD_COVER,
    },
    MoodBook {
        title: "The Hunger Games",
        author: "Suzanne Collins",
        cover_url: MOOD_COVER,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Adventurous,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Happy, Mood::Sad, Mood::Adventurous];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Adventurous => "adventurous",
        }
    }

    pub fn books(self) -> &'static [MoodBook] {
        match self {
            Mood::Happy => HAPPY,
            Mood::Sad => SAD,
            Mood::Adventurous => ADVENTUROUS,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid(
                    "mood",
                    format!("unknown mood '{s}' (expected happy, sad or adventurous)"),
                )
            })
    }
}

pub fn random_fact<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    FUN_FACTS.choose(rng).copied().unwrap_or_default()
}

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> Option<&'static BookQuote> {
    BOOK_QUOTES.choose(rng)
}

pub fn random_mood_book<R: Rng + ?Sized>(mood: Mood, rng: &mut R) -> Option<&'static MoodBook> {
    mood.books().choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn mood_parses_case_insensitively() {
        assert_eq!("Happy".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!(" adventurous ".parse::<Mood>().unwrap(), Mood::Adventurous);
        assert!("angry".parse::<Mood>().is_err());
    }

    #[test]
    fn random_picks_come_from_the_lists() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(FUN_FACTS.contains(&random_fact(&mut rng)));
            assert!(BOOK_QUOTES.contains(random_quote(&mut rng).unwrap()));
            let book = random_mood_book(Mood::Sad, &mut rng).unwrap();
            assert!(SAD.contains(book));
        }
    }

    #[test]
    fn every_mood_has_books() {
        for mood in Mood::ALL {
            assert_eq!(mood.books().len(), 2);
        }
    }
}
