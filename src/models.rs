//! Domain models that mirror the `books` table. `BookDraft` can only come out
//! of [`crate::validation::validate`] and `Book` can only be built from a
//! draft (or read back from the store), so any record the library writes has
//! already passed the field rules.

use std::fmt;

/// Separator used when genre tokens are flattened into the `genres` column.
pub const GENRE_SEPARATOR: char = ',';

/// Genres offered for marking even before any book in the catalog uses them.
pub const PRESET_GENRES: &[&str] = &[
    "Science Fiction",
    "Detective",
    "Novel",
    "Non-fiction",
    "Biography",
    "Horror",
    "Adventure",
    "Fantasy",
    "Children's",
    "Gothic",
    "Philosophy",
];

/// Set of genre tokens that remembers insertion order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Genres {
    tokens: Vec<String>,
}

impl Genres {
    /// Build a set from arbitrary tokens. Each token is trimmed; blanks and
    /// repeats are dropped while the first occurrence keeps its position.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut genres = Self::default();
        for token in tokens {
            let token = token.as_ref().trim();
            if !token.is_empty() && !genres.contains(token) {
                genres.tokens.push(token.to_string());
            }
        }
        genres
    }

    /// Split the delimited text stored in the `genres` column.
    pub fn parse(column: &str) -> Self {
        Self::from_tokens(column.split(GENRE_SEPARATOR))
    }

    /// Flatten back into the delimited column representation.
    pub fn to_column(&self) -> String {
        let separator = GENRE_SEPARATOR.to_string();
        self.tokens.join(&separator)
    }

    /// Exact, case-sensitive membership test on trimmed tokens.
    pub fn contains(&self, genre: &str) -> bool {
        self.tokens.iter().any(|token| token == genre)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Genres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(", "))
    }
}

/// Validated field values for a book that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: i64,
    pub(crate) pages: i64,
    pub(crate) rating: f64,
    pub(crate) current_page: i64,
    pub(crate) genres: Genres,
    pub(crate) cover: Option<Vec<u8>>,
}

impl BookDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn pages(&self) -> i64 {
        self.pages
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn genres(&self) -> &Genres {
        &self.genres
    }

    pub fn cover(&self) -> Option<&[u8]> {
        self.cover.as_deref()
    }
}

/// A persisted book record.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// Primary key assigned by SQLite. Never chosen by the caller.
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: i64,
    pub(crate) pages: i64,
    pub(crate) rating: f64,
    /// Last page the reader reached, `0..=pages` for anything written by
    /// this crate.
    pub(crate) current_page: i64,
    pub(crate) genres: Genres,
    /// Encoded image bytes. Never decoded here.
    pub(crate) cover: Option<Vec<u8>>,
}

impl Book {
    /// Pair validated values with an existing id, typically to feed
    /// [`crate::repository::BookRepository::update`].
    pub fn from_draft(id: i64, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            year: draft.year,
            pages: draft.pages,
            rating: draft.rating,
            current_page: draft.current_page,
            genres: draft.genres,
            cover: draft.cover,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn pages(&self) -> i64 {
        self.pages
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn genres(&self) -> &Genres {
        &self.genres
    }

    pub fn cover(&self) -> Option<&[u8]> {
        self.cover.as_deref()
    }

    /// Fraction of the book already read, clamped to `0.0..=1.0`. A record
    /// without a page count reports no progress.
    pub fn progress(&self) -> f64 {
        if self.pages <= 0 {
            return 0.0;
        }
        (self.current_page as f64 / self.pages as f64).clamp(0.0, 1.0)
    }

    /// Whole-number percentage, truncated rather than rounded.
    pub fn progress_percent(&self) -> u32 {
        (self.progress() * 100.0) as u32
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
