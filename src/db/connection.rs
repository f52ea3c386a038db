use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::info;

use crate::error::{Result, StoreContext, TrackerError};

/// Handle on the SQLite file backing the library. Only the path is kept:
/// every operation opens its own connection and drops it before returning,
/// on success and failure alike.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Ensure the database file exists, run lazy migrations, and return a
    /// handle for later operations.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| TrackerError::DataDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(&path).context("failed to open SQLite database")?;
        ensure_schema(&conn)?;
        info!(path = %path.display(), "opened book store");

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a short-lived connection. The create flag is left out on purpose
    /// so a database file that disappeared after `open` surfaces as an error.
    pub(crate) fn connect(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("failed to open SQLite database")
    }
}

/// Create the `books` table if it does not exist yet. The layout matches
/// data files written by earlier versions of the tracker.
fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            year INTEGER,
            pages INTEGER,
            rating REAL,
            genres TEXT,
            current_page INTEGER,
            cover BLOB
        )",
        [],
    )
    .context("failed to create books table")?;

    Ok(())
}
