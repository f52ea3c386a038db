//! Core library for the personal book tracker: field validation, the SQLite
//! store, the repository wrapped around it, and the catalog / genre / filter
//! layer that projects a view over the stored collection.
//!
//! Everything is synchronous and assumes a single process using the store at
//! a time.
pub mod catalog;
pub mod config;
pub mod cover;
pub mod db;
pub mod error;
pub mod filter;
pub mod genres;
pub mod models;
pub mod repository;
pub mod validation;

pub use catalog::Catalog;
pub use config::Config;
pub use db::Store;
pub use error::{Result, TrackerError};
pub use filter::{filter, BookFilter};
pub use genres::{GenreRegistry, GenreSelector, ALL_GENRES_LABEL};
pub use models::{Book, BookDraft, Genres, PRESET_GENRES};
pub use repository::{BookRepository, SqliteBookRepository};
pub use validation::{validate, FieldError, RawBookFields, ValidationErrors};
