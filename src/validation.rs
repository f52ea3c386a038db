//! Field rules that turn raw form input into a [`BookDraft`]. All rules run
//! on every call and every violation is collected, so a caller with three bad
//! fields sees three messages at once.

use std::fmt;

use thiserror::Error;

use crate::models::{Book, BookDraft, Genres, GENRE_SEPARATOR};

/// Highest accepted rating.
pub const MAX_RATING: f64 = 10.0;

/// Raw input as typed by the user, before any parsing.
#[derive(Debug, Clone, Default)]
pub struct RawBookFields {
    pub title: String,
    pub author: String,
    pub year: String,
    pub pages: String,
    pub rating: String,
    pub current_page: String,
    /// Genre tokens the user marked.
    pub genres: Vec<String>,
    pub cover: Option<Vec<u8>>,
}

impl RawBookFields {
    /// Prefill raw fields from a stored record so an edit starts from the
    /// current values.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title().to_string(),
            author: book.author().to_string(),
            year: book.year().to_string(),
            pages: book.pages().to_string(),
            rating: book.rating().to_string(),
            current_page: book.current_page().to_string(),
            genres: book.genres().iter().map(str::to_string).collect(),
            cover: book.cover().map(<[u8]>::to_vec),
        }
    }
}

/// A single rejected field. Parse failures and range failures are separate
/// variants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Title is required.")]
    TitleMissing,

    #[error("Author is required.")]
    AuthorMissing,

    #[error("Year must be a number.")]
    YearNotANumber,

    #[error("Year must not be negative.")]
    YearNegative,

    #[error("Page count must be a number.")]
    PagesNotANumber,

    #[error("Page count must be positive.")]
    PagesNotPositive,

    #[error("Rating must be a number.")]
    RatingNotANumber,

    #[error("Rating must be between 0 and 10.")]
    RatingOutOfRange,

    #[error("Current page must be a number.")]
    CurrentPageNotANumber,

    #[error("Current page must not be negative.")]
    CurrentPageNegative,

    #[error("Current page must be between 0 and {pages}.")]
    CurrentPageBeyondEnd { pages: i64 },

    #[error("Select at least one genre.")]
    NoGenreSelected,

    #[error("Genre \"{0}\" must not contain a comma.")]
    GenreContainsSeparator(String),
}

/// Non-empty, ordered list of field errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Human-readable messages in report order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn contains(&self, error: &FieldError) -> bool {
        self.errors.contains(error)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.errors.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check every field and return either a clean draft or every violation.
///
/// The current page is always parsed and rejected when negative. Its upper
/// bound is only checked when the page count itself was valid; an invalid
/// page count already carries its own message.
pub fn validate(raw: &RawBookFields) -> Result<BookDraft, ValidationErrors> {
    let mut errors = Vec::new();

    let title = raw.title.trim();
    if title.is_empty() {
        errors.push(FieldError::TitleMissing);
    }

    let author = raw.author.trim();
    if author.is_empty() {
        errors.push(FieldError::AuthorMissing);
    }

    let year = match raw.year.trim().parse::<i64>() {
        Ok(year) if year < 0 => {
            errors.push(FieldError::YearNegative);
            None
        }
        Ok(year) => Some(year),
        Err(_) => {
            errors.push(FieldError::YearNotANumber);
            None
        }
    };

    let pages = match raw.pages.trim().parse::<i64>() {
        Ok(pages) if pages <= 0 => {
            errors.push(FieldError::PagesNotPositive);
            None
        }
        Ok(pages) => Some(pages),
        Err(_) => {
            errors.push(FieldError::PagesNotANumber);
            None
        }
    };

    let rating = match raw.rating.trim().parse::<f64>() {
        // NaN fails `contains`, so it lands here as out of range.
        Ok(rating) if !(0.0..=MAX_RATING).contains(&rating) => {
            errors.push(FieldError::RatingOutOfRange);
            None
        }
        Ok(rating) => Some(rating),
        Err(_) => {
            errors.push(FieldError::RatingNotANumber);
            None
        }
    };

    let current_page = match raw.current_page.trim().parse::<i64>() {
        Ok(page) if page < 0 => {
            errors.push(FieldError::CurrentPageNegative);
            None
        }
        Ok(page) => match pages {
            Some(pages) if page > pages => {
                errors.push(FieldError::CurrentPageBeyondEnd { pages });
                None
            }
            _ => Some(page),
        },
        Err(_) => {
            errors.push(FieldError::CurrentPageNotANumber);
            None
        }
    };

    let genres = Genres::from_tokens(&raw.genres);
    if genres.is_empty() {
        errors.push(FieldError::NoGenreSelected);
    }
    for token in genres.iter() {
        if token.contains(GENRE_SEPARATOR) {
            errors.push(FieldError::GenreContainsSeparator(token.to_string()));
        }
    }

    match (year, pages, rating, current_page) {
        (Some(year), Some(pages), Some(rating), Some(current_page)) if errors.is_empty() => {
            Ok(BookDraft {
                title: title.to_string(),
                author: author.to_string(),
                year,
                pages,
                rating,
                current_page,
                genres,
                cover: raw.cover.clone().filter(|bytes| !bytes.is_empty()),
            })
        }
        _ => Err(ValidationErrors { errors }),
    }
}
