//! SQLite-backed record store.
//!
//! Provides persistent storage for:
//! - Reading streaks and goals (the [`StreakStore`] / [`GoalStore`] seams)
//! - Reading challenges, shelves, points and achievements
//! - Profiles, book clubs and the community recommendation list

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::date::CalendarDate;
use crate::error::{CoreError, DatabaseError};
use crate::goal::{ChallengeRecord, Goal, GoalRecord};
use crate::library::{Achievement, Achievements, BookClub, BookMetadata, ProfileColor, ShelfBook, UserProfile};
use crate::streak::StreakRecord;
use crate::user::UserId;

use super::config::Config;
use super::migrations;
use super::store::{GoalStore, StreakStore};

/// SQLite database holding every per-user record of the bot.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the database configured by `config` (or `SHELFSTREAK_DB`).
    pub fn open(config: &Config) -> Result<Self, CoreError> {
        let path = config.database_path()?;
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) the database file at `path` and migrate it.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            }
        }
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opening database");
        Self::init(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::Locked)
    }

    // ── Reading challenges ───────────────────────────────────────────

    pub fn load_challenge(&self, user_id: &UserId) -> Result<Option<ChallengeRecord>, DatabaseError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT goal, progress FROM reading_challenges WHERE user_id = ?1",
                params![user_id.as_str()],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, u32>(1)?)),
            )
            .optional()?;
        row.map(|(goal, progress)| {
            let goal = Goal::new(goal).map_err(|_| DatabaseError::Corrupt {
                table: "reading_challenges",
                column: "goal",
                value: goal.to_string(),
            })?;
            Ok(ChallengeRecord {
                user_id: user_id.clone(),
                goal,
                progress,
            })
        })
        .transpose()
    }

    pub fn save_challenge(&self, record: &ChallengeRecord) -> Result<(), DatabaseError> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO reading_challenges (user_id, goal, progress) VALUES (?1, ?2, ?3)",
            params![record.user_id.as_str(), record.goal.get(), record.progress],
        )?;
        Ok(())
    }

    // ── Shelves ──────────────────────────────────────────────────────

    /// Books on the user's shelf in the order they were added.
    pub fn shelf(&self, user_id: &UserId) -> Result<Vec<ShelfBook>, DatabaseError> {
        read_shelf(&*self.conn()?, user_id)
    }

    /// Append a book and return the new shelf size.
    pub fn add_book(&self, user_id: &UserId, book: &ShelfBook) -> Result<u32, DatabaseError> {
        let conn = self.conn()?;
        insert_book(&conn, user_id, book)?;
        count_books(&conn, user_id)
    }

    /// Shelve a book, award `points` and evaluate achievements as one
    /// transaction. Returns the new shelf size and the newly unlocked
    /// achievements.
    pub fn shelve_book(
        &self,
        user_id: &UserId,
        book: &ShelfBook,
        points: i64,
    ) -> Result<(u32, Vec<Achievement>), DatabaseError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        insert_book(&tx, user_id, book)?;
        upsert_points(&tx, user_id, points)?;

        let mut achievements = read_achievements(&tx, user_id)?.unwrap_or_default();
        let unlocked = achievements.evaluate(&read_shelf(&tx, user_id)?);
        if !unlocked.is_empty() {
            write_achievements(&tx, user_id, &achievements)?;
        }
        let count = count_books(&tx, user_id)?;
        tx.commit()?;
        Ok((count, unlocked))
    }

    /// Remove the earliest copy of `title`. Returns the new shelf size, or
    /// `None` if the title was not on the shelf.
    pub fn remove_book(&self, user_id: &UserId, title: &str) -> Result<Option<u32>, DatabaseError> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM user_books WHERE id = (
                SELECT id FROM user_books WHERE user_id = ?1 AND title = ?2 ORDER BY id LIMIT 1
             )",
            params![user_id.as_str(), title],
        )?;
        if removed == 0 {
            return Ok(None);
        }
        count_books(&conn, user_id).map(Some)
    }

    /// Book count of every user with at least one book.
    pub fn book_counts(&self) -> Result<Vec<(UserId, u32)>, DatabaseError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT user_id, COUNT(*) FROM user_books GROUP BY user_id")?;
        let rows = stmt.query_map([], |row| {
            Ok((UserId::new(row.get::<_, String>(0)?), row.get::<_, u32>(1)?))
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Points and achievements ──────────────────────────────────────

    pub fn points(&self, user_id: &UserId) -> Result<Option<i64>, DatabaseError> {
        self.conn()?
            .query_row(
                "SELECT points FROM user_points WHERE user_id = ?1",
                params![user_id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn load_achievements(&self, user_id: &UserId) -> Result<Option<Achievements>, DatabaseError> {
        read_achievements(&*self.conn()?, user_id)
    }

    // ── Profiles ─────────────────────────────────────────────────────

    pub fn load_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, DatabaseError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT favorite_books, bio, profile_color FROM user_profiles WHERE user_id = ?1",
                params![user_id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(favorites, bio, color)| {
            let favorite_books: Vec<String> =
                serde_json::from_str(&favorites).map_err(|_| DatabaseError::Corrupt {
                    table: "user_profiles",
                    column: "favorite_books",
                    value: favorites.clone(),
                })?;
            let color: ProfileColor = color.parse().map_err(|_| DatabaseError::Corrupt {
                table: "user_profiles",
                column: "profile_color",
                value: color.clone(),
            })?;
            Ok(UserProfile {
                user_id: user_id.clone(),
                favorite_books,
                bio,
                color,
            })
        })
        .transpose()
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), DatabaseError> {
        let favorites = serde_json::to_string(&profile.favorite_books)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn()?.execute(
            "INSERT OR REPLACE INTO user_profiles (user_id, favorite_books, bio, profile_color)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                profile.user_id.as_str(),
                favorites,
                profile.bio,
                profile.color.as_str(),
            ],
        )?;
        Ok(())
    }

    // ── Book clubs ───────────────────────────────────────────────────

    /// Insert `club`. Returns `false` if a club with the same id exists.
    pub fn create_club(&self, club: &BookClub) -> Result<bool, DatabaseError> {
        let inserted = self.conn()?.execute(
            "INSERT OR IGNORE INTO book_clubs (club_id, name, owner_id) VALUES (?1, ?2, ?3)",
            params![club.club_id, club.name, club.owner_id.as_str()],
        )?;
        Ok(inserted == 1)
    }

    pub fn load_club(&self, club_id: &str) -> Result<Option<BookClub>, DatabaseError> {
        self.conn()?
            .query_row(
                "SELECT club_id, name, owner_id FROM book_clubs WHERE club_id = ?1",
                params![club_id],
                |row| {
                    Ok(BookClub {
                        club_id: row.get(0)?,
                        name: row.get(1)?,
                        owner_id: UserId::new(row.get::<_, String>(2)?),
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    // ── Recommendations ──────────────────────────────────────────────

    pub fn add_recommendation(&self, book: &BookMetadata) -> Result<(), DatabaseError> {
        self.conn()?.execute(
            "INSERT INTO recommendations (title, author, description, genre, cover_url)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![book.title, book.author, book.description, book.genre, book.cover_url],
        )?;
        Ok(())
    }

    pub fn recommendations(&self) -> Result<Vec<BookMetadata>, DatabaseError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT title, author, description, genre, cover_url FROM recommendations ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(BookMetadata {
                title: row.get(0)?,
                author: row.get(1)?,
                description: row.get(2)?,
                genre: row.get(3)?,
                cover_url: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Maintenance ──────────────────────────────────────────────────

    /// Write a consistent copy of the database into `dir` and return its path.
    pub fn backup_to(&self, dir: &Path, now: DateTime<Utc>) -> Result<PathBuf, DatabaseError> {
        std::fs::create_dir_all(dir).map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let target = dir.join(format!("shelfstreak_{}.db", now.format("%Y-%m-%dT%H-%M-%S")));
        self.conn()?
            .execute("VACUUM INTO ?1", params![target.to_string_lossy()])?;
        tracing::info!(path = %target.display(), "database backup written");
        Ok(target)
    }
}

fn read_shelf(conn: &Connection, user_id: &UserId) -> Result<Vec<ShelfBook>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT title, author, genre FROM user_books WHERE user_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user_id.as_str()], |row| {
        Ok(ShelfBook {
            title: row.get(0)?,
            author: row.get(1)?,
            genre: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn insert_book(conn: &Connection, user_id: &UserId, book: &ShelfBook) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO user_books (user_id, title, author, genre) VALUES (?1, ?2, ?3, ?4)",
        params![user_id.as_str(), book.title, book.author, book.genre],
    )?;
    Ok(())
}

fn upsert_points(conn: &Connection, user_id: &UserId, delta: i64) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO user_points (user_id, points) VALUES (?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET points = points + excluded.points",
        params![user_id.as_str(), delta],
    )?;
    conn.query_row(
        "SELECT points FROM user_points WHERE user_id = ?1",
        params![user_id.as_str()],
        |row| row.get(0),
    )
    .map_err(Into::into)
}

fn read_achievements(conn: &Connection, user_id: &UserId) -> Result<Option<Achievements>, DatabaseError> {
    conn.query_row(
        "SELECT bookworm, marathon_reader, genre_explorer FROM achievements WHERE user_id = ?1",
        params![user_id.as_str()],
        |row| {
            Ok(Achievements {
                bookworm: row.get(0)?,
                marathon_reader: row.get(1)?,
                genre_explorer: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

fn write_achievements(
    conn: &Connection,
    user_id: &UserId,
    achievements: &Achievements,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR REPLACE INTO achievements (user_id, bookworm, marathon_reader, genre_explorer)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            user_id.as_str(),
            achievements.bookworm,
            achievements.marathon_reader,
            achievements.genre_explorer,
        ],
    )?;
    Ok(())
}

fn write_streak(conn: &Connection, record: &StreakRecord) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR REPLACE INTO user_streaks (user_id, current_streak, highest_streak, last_log_date)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            record.user_id.as_str(),
            record.current_streak,
            record.highest_streak,
            record.last_log_date.map(CalendarDate::to_iso_string),
        ],
    )?;
    Ok(())
}

fn count_books(conn: &Connection, user_id: &UserId) -> Result<u32, DatabaseError> {
    conn.query_row(
        "SELECT COUNT(*) FROM user_books WHERE user_id = ?1",
        params![user_id.as_str()],
        |row| row.get(0),
    )
    .map_err(Into::into)
}

impl StreakStore for Database {
    fn load_streak(&self, user_id: &UserId) -> Result<Option<StreakRecord>, DatabaseError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT current_streak, highest_streak, last_log_date FROM user_streaks WHERE user_id = ?1",
                params![user_id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, u32>(0)?,
                        row.get::<_, u32>(1)?,
                        row.get::<_, Option<String>>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(current_streak, highest_streak, last)| {
            let last_log_date = last
                .map(|value| {
                    CalendarDate::parse_iso(&value).map_err(|_| DatabaseError::Corrupt {
                        table: "user_streaks",
                        column: "last_log_date",
                        value,
                    })
                })
                .transpose()?;
            Ok(StreakRecord {
                user_id: user_id.clone(),
                current_streak,
                highest_streak,
                last_log_date,
            })
        })
        .transpose()
    }

    fn save_streak(&self, record: &StreakRecord) -> Result<(), DatabaseError> {
        write_streak(&*self.conn()?, record)
    }

    fn log_streak(&self, record: &StreakRecord, points: i64) -> Result<(), DatabaseError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        write_streak(&tx, record)?;
        upsert_points(&tx, &record.user_id, points)?;
        tx.commit()?;
        Ok(())
    }
}

impl GoalStore for Database {
    fn load_goal(&self, user_id: &UserId) -> Result<Option<i64>, DatabaseError> {
        self.conn()?
            .query_row(
                "SELECT goal FROM user_goals WHERE user_id = ?1",
                params![user_id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn save_goal(&self, record: &GoalRecord) -> Result<(), DatabaseError> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO user_goals (user_id, goal) VALUES (?1, ?2)",
            params![record.user_id.as_str(), record.goal.get()],
        )?;
        Ok(())
    }

    fn book_count(&self, user_id: &UserId) -> Result<u32, DatabaseError> {
        let conn = self.conn()?;
        count_books(&conn, user_id)
    }
}
