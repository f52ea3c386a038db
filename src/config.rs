use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::{Result, TrackerError};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-tracker";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "books.sqlite";
/// Environment variable that overrides the default database location.
pub const DB_ENV_VAR: &str = "BOOK_TRACKER_DB";

/// Runtime settings for opening the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    /// Resolve the database location: an explicit path wins, then
    /// `BOOK_TRACKER_DB`, then `~/.book-tracker/books.sqlite`.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let env = std::env::var_os(DB_ENV_VAR).map(PathBuf::from);
        Self::resolve_with(explicit, env)
    }

    fn resolve_with(explicit: Option<PathBuf>, env: Option<PathBuf>) -> Result<Self> {
        let db_path = match explicit.or(env).filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => path,
            None => default_db_path()?,
        };
        Ok(Self { db_path })
    }
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(TrackerError::NoHomeDir)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_beats_environment() {
        let config = Config::resolve_with(
            Some(PathBuf::from("/tmp/a.sqlite")),
            Some(PathBuf::from("/tmp/b.sqlite")),
        )
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/a.sqlite"));
    }

    #[test]
    fn environment_used_when_no_flag() {
        let config = Config::resolve_with(None, Some(PathBuf::from("/tmp/b.sqlite"))).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/b.sqlite"));
    }

    #[test]
    fn default_lives_under_home() {
        if let Ok(config) = Config::resolve_with(None, None) {
            assert!(config.db_path.ends_with(".book-tracker/books.sqlite"));
        }
    }
}
