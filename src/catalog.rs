//! Immutable snapshot of every stored book.

use std::sync::Arc;

use crate::error::Result;
use crate::filter::{self, BookFilter};
use crate::genres::GenreRegistry;
use crate::models::Book;
use crate::repository::BookRepository;

/// Read-only view of the collection as of the last `list_all`. There is no
/// way to patch a catalog in place; refreshing means building a new one. A
/// failed refresh returns the error and leaves the caller's current catalog
/// untouched.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Arc<[Book]>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: books.into(),
        }
    }

    /// Load a fresh snapshot through the repository.
    pub fn load(repo: &impl BookRepository) -> Result<Self> {
        repo.list_all().map(Self::new)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn get(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|book| book.id() == id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Genre vocabulary of this snapshot.
    pub fn genres(&self) -> GenreRegistry {
        GenreRegistry::from_catalog(self)
    }

    /// Books passing `criteria`, in catalog order.
    pub fn filter(&self, criteria: &BookFilter) -> Vec<&Book> {
        filter::apply(self, criteria)
    }
}
