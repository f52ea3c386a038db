//! Error types shared by the persistence and validation layers.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result type alias using [`TrackerError`].
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Every failure the library can hand back to its caller.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// One or more raw fields were rejected. The full list is always carried.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The store could not be reached or a statement failed.
    #[error("{context}")]
    Persistence {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// An update referenced an id with no stored record.
    #[error("Book {0} not found")]
    NotFound(i64),

    #[error("failed to create data directory {}", .path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to access cover image {}", .path.display())]
    Cover {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not locate home directory")]
    NoHomeDir,
}

/// Attach a short "failed to ..." label to a rusqlite result, the same way
/// every SQL call in the `db` module is annotated.
pub(crate) trait StoreContext<T> {
    fn context(self, context: &'static str) -> Result<T>;
}

impl<T> StoreContext<T> for rusqlite::Result<T> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|source| TrackerError::Persistence { context, source })
    }
}
