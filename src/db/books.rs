use rusqlite::{params, Connection, Row};

use crate::error::{Result, StoreContext};
use crate::models::{Book, BookDraft, Genres};

/// Map a `SELECT id, title, author, year, pages, rating, genres,
/// current_page, cover` row. Nullable columns written by older versions read
/// back as zero / empty rather than failing the whole listing.
fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    let genres: Option<String> = row.get(6)?;
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        year: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
        pages: row.get::<_, Option<i64>>(4)?.unwrap_or(0),
        rating: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
        genres: genres.as_deref().map(Genres::parse).unwrap_or_default(),
        current_page: row.get::<_, Option<i64>>(7)?.unwrap_or(0),
        cover: row.get(8)?,
    })
}

/// Every stored book in primary-key order.
pub(crate) fn fetch_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, author, year, pages, rating, genres, current_page, cover
             FROM books
             ORDER BY id",
        )
        .context("failed to prepare book query")?;

    let books = stmt
        .query_map([], book_from_row)
        .context("failed to load books")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect books")?;

    Ok(books)
}

/// Raw `genres` column of every row that has one.
pub(crate) fn fetch_genre_columns(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT genres FROM books WHERE genres IS NOT NULL")
        .context("failed to prepare genre query")?;

    let mut rows = stmt.query([]).context("failed to execute genre query")?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next().context("failed to fetch genre row")? {
        let column: String = row.get(0).context("failed to read genre value")?;
        columns.push(column);
    }

    Ok(columns)
}

/// Insert a new row and return the id SQLite assigned to it.
pub(crate) fn insert_book(conn: &Connection, draft: &BookDraft) -> Result<i64> {
    conn.execute(
        "INSERT INTO books (title, author, year, pages, rating, genres, current_page, cover)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            draft.title,
            draft.author,
            draft.year,
            draft.pages,
            draft.rating,
            draft.genres.to_column(),
            draft.current_page,
            draft.cover,
        ],
    )
    .context("failed to insert book")?;

    Ok(conn.last_insert_rowid())
}

/// Overwrite every column of the row with `book.id`. Returns the number of
/// rows touched so the caller can decide what zero means.
pub(crate) fn update_book(conn: &Connection, book: &Book) -> Result<usize> {
    conn.execute(
        "UPDATE books
         SET title = ?1, author = ?2, year = ?3, pages = ?4, rating = ?5,
             genres = ?6, current_page = ?7, cover = ?8
         WHERE id = ?9",
        params![
            book.title,
            book.author,
            book.year,
            book.pages,
            book.rating,
            book.genres.to_column(),
            book.current_page,
            book.cover,
            book.id,
        ],
    )
    .context("failed to update book")
}

/// Remove the row with `id`, returning how many rows went away.
pub(crate) fn delete_book(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM books WHERE id = ?1", params![id])
        .context("failed to delete book")
}
