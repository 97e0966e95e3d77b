//! TOML-based application configuration.
//!
//! Stores bot settings including:
//! - The administrator allow-list for streak overrides
//! - Book metadata service endpoint and fallbacks
//! - Point awards
//! - Leaderboard size and default profile colour
//! - Optional database and log locations
//!
//! Configuration is stored at `~/.config/shelfstreak/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::library::profile::DEFAULT_PROFILE_COLOR;

/// Privileged identities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// User ids allowed to run administrative commands.
    #[serde(default)]
    pub user_ids: Vec<String>,
}

/// Book metadata service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_url")]
    pub base_url: String,
    #[serde(default = "default_cover_url")]
    pub covers_url: String,
    /// Image shown when a book has no cover.
    #[serde(default = "default_placeholder_cover")]
    pub placeholder_cover: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Point awards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsConfig {
    #[serde(default = "default_points_per_book")]
    pub per_book: i64,
    #[serde(default = "default_points_per_streak_day")]
    pub per_streak_day: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    #[serde(default = "default_leaderboard_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_profile_color")]
    pub default_color: String,
}

/// Locations overriding the data directory defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub log_directory: Option<PathBuf>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/shelfstreak/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub points: PointsConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_catalog_url() -> String {
    "https://openlibrary.org".into()
}
fn default_cover_url() -> String {
    "https://covers.openlibrary.org".into()
}
fn default_placeholder_cover() -> String {
    "https://via.placeholder.com/150".into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_points_per_book() -> i64 {
    10
}
fn default_points_per_streak_day() -> i64 {
    1
}
fn default_leaderboard_limit() -> usize {
    10
}
fn default_profile_color() -> String {
    DEFAULT_PROFILE_COLOR.into()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            covers_url: default_cover_url(),
            placeholder_cover: default_placeholder_cover(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            per_book: default_points_per_book(),
            per_streak_day: default_points_per_streak_day(),
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            limit: default_leaderboard_limit(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            default_color: default_profile_color(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Array(_) => {
                        if value.trim_start().starts_with('[') {
                            serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                        } else {
                            serde_json::Value::Array(
                                value
                                    .split(',')
                                    .map(str::trim)
                                    .filter(|s| !s.is_empty())
                                    .map(|s| serde_json::Value::String(s.to_string()))
                                    .collect(),
                            )
                        }
                    }
                    serde_json::Value::Object(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, or return defaults when the file
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, or return defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Database file, honouring `SHELFSTREAK_DB` and `storage.database_path`.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var("SHELFSTREAK_DB") {
            return Ok(PathBuf::from(path));
        }
        match &self.storage.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("shelfstreak.db")),
        }
    }

    /// Directory for rolling log files.
    pub fn log_directory(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage.log_directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("logs")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.points.per_book, 10);
        assert_eq!(parsed.leaderboard.limit, 10);
        assert!(parsed.admin.user_ids.is_empty());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[admin]\nuser_ids = [\"1252732120711954596\"]\n").unwrap();
        assert_eq!(parsed.admin.user_ids, vec!["1252732120711954596".to_string()]);
        assert_eq!(parsed.catalog.base_url, "https://openlibrary.org");
        assert_eq!(parsed.profile.default_color, "#800080");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("points.per_book").as_deref(), Some("10"));
        assert_eq!(cfg.get("catalog.base_url").as_deref(), Some("https://openlibrary.org"));
        assert!(cfg.get("catalog.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_number_and_string() {
        let mut cfg = Config::default();
        cfg.set("points.per_book", "25").unwrap();
        cfg.set("catalog.base_url", "http://localhost:9000").unwrap();
        assert_eq!(cfg.points.per_book, 25);
        assert_eq!(cfg.catalog.base_url, "http://localhost:9000");
    }

    #[test]
    fn set_admin_list_from_comma_separated_value() {
        let mut cfg = Config::default();
        cfg.set("admin.user_ids", "1, 2,3").unwrap();
        assert_eq!(cfg.admin.user_ids, vec!["1", "2", "3"]);
        cfg.set("admin.user_ids", "[\"9\"]").unwrap();
        assert_eq!(cfg.admin.user_ids, vec!["9"]);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("points.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("leaderboard.limit", "many"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg.points.per_streak_day, 1);
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("leaderboard.limit", "3").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.leaderboard.limit, 3);
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "points = \"nope\"").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));
    }
}
