//! Reader-owned data around the streak core: shelves, profiles, points,
//! achievements, clubs and the leaderboard.

pub mod achievements;
pub mod books;
pub mod clubs;
pub mod leaderboard;
pub mod profile;

pub use achievements::{Achievement, Achievements};
pub use books::{BookMetadata, ShelfBook};
pub use clubs::BookClub;
pub use leaderboard::LeaderboardEntry;
pub use profile::{ProfileColor, UserProfile};
