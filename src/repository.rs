//! Book repository: the only way the rest of the crate talks to the store.
//! Consumers receive a repository value instead of reaching for a global
//! handle, which also lets tests hand in a store living in a temp directory.

use tracing::{debug, warn};

use crate::db::{self, Store};
use crate::error::{Result, TrackerError};
use crate::genres::collect_genres;
use crate::models::{Book, BookDraft, GENRE_SEPARATOR};

/// Create, update, delete and list books.
///
/// Every call blocks until the store answers and runs as a single SQL
/// statement; there is no batching and no cross-call transaction.
pub trait BookRepository {
    /// Persist a validated draft and return it with the assigned id.
    fn insert(&self, draft: BookDraft) -> Result<Book>;

    /// Overwrite every field of the record with `book.id()`. Fails with
    /// [`TrackerError::NotFound`] when no such record exists.
    fn update(&self, book: &Book) -> Result<()>;

    /// Remove the record with `id`. Deleting an absent id is not an error;
    /// the returned flag tells whether a row was actually removed.
    fn delete(&self, id: i64) -> Result<bool>;

    /// Every stored book in primary-key order.
    fn list_all(&self) -> Result<Vec<Book>>;

    /// Distinct, trimmed genre tokens across all records, sorted.
    fn list_genres(&self) -> Result<Vec<String>>;
}

/// [`BookRepository`] backed by the SQLite [`Store`].
#[derive(Debug, Clone)]
pub struct SqliteBookRepository {
    store: Store,
}

impl SqliteBookRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl BookRepository for SqliteBookRepository {
    fn insert(&self, draft: BookDraft) -> Result<Book> {
        let conn = self.store.connect()?;
        let id = db::insert_book(&conn, &draft)?;
        debug!(id, title = draft.title(), "inserted book");
        Ok(Book::from_draft(id, draft))
    }

    fn update(&self, book: &Book) -> Result<()> {
        let conn = self.store.connect()?;
        let updated = db::update_book(&conn, book)?;

        if updated == 0 {
            Err(TrackerError::NotFound(book.id()))
        } else {
            debug!(id = book.id(), "updated book");
            Ok(())
        }
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.store.connect()?;
        let deleted = db::delete_book(&conn, id)?;

        if deleted == 0 {
            warn!(id, "delete skipped, no such book");
            Ok(false)
        } else {
            debug!(id, "deleted book");
            Ok(true)
        }
    }

    fn list_all(&self) -> Result<Vec<Book>> {
        let conn = self.store.connect()?;
        let books = db::fetch_books(&conn)?;
        debug!(count = books.len(), "loaded books");
        Ok(books)
    }

    fn list_genres(&self) -> Result<Vec<String>> {
        let conn = self.store.connect()?;
        let columns = db::fetch_genre_columns(&conn)?;
        let genres =
            collect_genres(columns.iter().flat_map(|column| column.split(GENRE_SEPARATOR)));
        Ok(genres.into_iter().collect())
    }
}
