//! Persistence module split across logical submodules.

mod books;
mod connection;

pub(crate) use books::{delete_book, fetch_books, fetch_genre_columns, insert_book, update_book};
pub use connection::Store;
