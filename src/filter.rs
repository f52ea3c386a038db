//! Search and genre filtering over a [`Catalog`].
//!
//! The visible subset is recomputed from scratch on every change to the
//! query or genre selector. Personal libraries stay small enough that a
//! linear scan per keystroke is not worth indexing.

use crate::catalog::Catalog;
use crate::genres::GenreSelector;
use crate::models::Book;

/// Text query plus genre selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    query: String,
    genre: GenreSelector,
}

impl BookFilter {
    pub fn new(query: impl Into<String>, genre: GenreSelector) -> Self {
        Self {
            query: query.into(),
            genre,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn genre(&self) -> &GenreSelector {
        &self.genre
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_genre(&mut self, genre: GenreSelector) {
        self.genre = genre;
    }

    /// Combined text and genre predicate for one record.
    pub fn matches(&self, book: &Book) -> bool {
        self.genre.matches(book.genres()) && matches_text(book, &normalize(&self.query))
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// `needle` must already be trimmed and lowercased.
fn matches_text(book: &Book, needle: &str) -> bool {
    needle.is_empty()
        || book.title().to_lowercase().contains(needle)
        || book.author().to_lowercase().contains(needle)
}

/// Books in `catalog` passing `criteria`, in catalog order.
pub fn apply<'a>(catalog: &'a Catalog, criteria: &BookFilter) -> Vec<&'a Book> {
    let needle = normalize(&criteria.query);
    catalog
        .iter()
        .filter(|book| criteria.genre.matches(book.genres()) && matches_text(book, &needle))
        .collect()
}

/// Convenience form of [`apply`] taking the query and selector directly.
pub fn filter<'a>(catalog: &'a Catalog, query: &str, genre: &GenreSelector) -> Vec<&'a Book> {
    apply(catalog, &BookFilter::new(query, genre.clone()))
}
