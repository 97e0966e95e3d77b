mod config;
pub mod database;
pub mod migrations;
pub mod store;

pub use config::{
    AdminConfig, CatalogConfig, Config, LeaderboardConfig, PointsConfig, ProfileConfig,
    StorageConfig,
};
pub use database::Database;
pub use store::{GoalStore, StreakStore};

use std::path::PathBuf;

/// Returns `~/.config/shelfstreak[-dev]/` based on SHELFSTREAK_ENV.
///
/// Set SHELFSTREAK_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SHELFSTREAK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("shelfstreak-dev")
    } else {
        base_dir.join("shelfstreak")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
