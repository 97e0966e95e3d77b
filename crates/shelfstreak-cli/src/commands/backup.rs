use std::path::PathBuf;

use shelfstreak_core::storage::data_dir;
use shelfstreak_core::{Config, Database};

/// Copy the database into `dir` (default: `<data dir>/backups`).
pub fn run(dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open(&config)?;
    let dir = match dir {
        Some(dir) => dir,
        None => data_dir()?.join("backups"),
    };
    let path = db.backup_to(&dir, chrono::Utc::now())?;
    println!("{}", path.display());
    Ok(())
}
