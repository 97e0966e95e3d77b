//! Database schema migrations for shelfstreak.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            tracing::warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration v1: reading records.
///
/// Streaks, goals, challenges, shelves and points.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS user_streaks (
            user_id        TEXT PRIMARY KEY,
            current_streak INTEGER NOT NULL DEFAULT 0,
            highest_streak INTEGER NOT NULL DEFAULT 0,
            last_log_date  TEXT
        );

        CREATE TABLE IF NOT EXISTS user_goals (
            user_id TEXT PRIMARY KEY,
            goal    INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS reading_challenges (
            user_id  TEXT PRIMARY KEY,
            goal     INTEGER NOT NULL,
            progress INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS user_books (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            title   TEXT NOT NULL,
            author  TEXT NOT NULL DEFAULT '',
            genre   TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_user_books_user ON user_books(user_id);

        CREATE TABLE IF NOT EXISTS user_points (
            user_id TEXT PRIMARY KEY,
            points  INTEGER NOT NULL DEFAULT 0
        );",
    )?;
    set_schema_version(&tx, 1)?;
    tx.commit()
}

/// Migration v2: community tables.
///
/// Profiles, achievements, book clubs and the shared recommendation list.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS user_profiles (
            user_id        TEXT PRIMARY KEY,
            favorite_books TEXT NOT NULL DEFAULT '[]',
            bio            TEXT NOT NULL DEFAULT '',
            profile_color  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS achievements (
            user_id         TEXT PRIMARY KEY,
            bookworm        INTEGER NOT NULL DEFAULT 0,
            marathon_reader INTEGER NOT NULL DEFAULT 0,
            genre_explorer  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS book_clubs (
            club_id  TEXT PRIMARY KEY,
            name     TEXT NOT NULL,
            owner_id TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS recommendations (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            author      TEXT NOT NULL,
            description TEXT NOT NULL,
            genre       TEXT NOT NULL,
            cover_url   TEXT NOT NULL
        );",
    )?;
    set_schema_version(&tx, 2)?;
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_reaches_current_version() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), SCHEMA_VERSION);
    }

    #[test]
    fn migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), SCHEMA_VERSION);
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'user_streaks'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn v1_database_is_upgraded() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema_version_table(&conn).unwrap();
        migrate_v1(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), 1);

        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), 2);
        conn.execute(
            "INSERT INTO book_clubs (club_id, name, owner_id) VALUES ('g-a', 'A', 'u')",
            [],
        )
        .unwrap();
    }
}
