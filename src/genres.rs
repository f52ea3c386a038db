//! Genre vocabulary derived from the catalog, plus the selector used by the
//! filter. Nothing here is stored; the registry is rebuilt whenever the
//! catalog is refreshed.

use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::Catalog;
use crate::models::{Genres, PRESET_GENRES};

/// Label shown for [`GenreSelector::All`].
pub const ALL_GENRES_LABEL: &str = "All genres";

/// Trim, drop blanks, dedupe and sort a stream of raw tokens.
pub(crate) fn collect_genres<'a, I>(tokens: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Which genre the filter should keep. `All` is a sentinel, never a token,
/// so a book tagged "All genres" cannot collide with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenreSelector {
    #[default]
    All,
    Genre(String),
}

impl GenreSelector {
    pub fn genre(genre: impl Into<String>) -> Self {
        Self::Genre(genre.into())
    }

    pub fn matches(&self, genres: &Genres) -> bool {
        match self {
            Self::All => true,
            Self::Genre(genre) => genres.contains(genre),
        }
    }
}

impl From<Option<String>> for GenreSelector {
    fn from(genre: Option<String>) -> Self {
        genre.map_or(Self::All, Self::Genre)
    }
}

impl fmt::Display for GenreSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_GENRES_LABEL}"),
            Self::Genre(genre) => write!(f, "{genre}"),
        }
    }
}

/// Sorted, distinct genre tokens present in a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreRegistry {
    genres: BTreeSet<String>,
}

impl GenreRegistry {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            genres: collect_genres(catalog.iter().flat_map(|book| book.genres().iter())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.genres.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    /// Filter choices: the "all genres" sentinel followed by every token.
    pub fn choices(&self) -> Vec<GenreSelector> {
        std::iter::once(GenreSelector::All)
            .chain(self.genres.iter().cloned().map(GenreSelector::Genre))
            .collect()
    }

    /// Genres a user may mark on a book: the presets plus anything already
    /// in use, sorted.
    pub fn selectable(&self) -> Vec<String> {
        let mut all = self.genres.clone();
        all.extend(PRESET_GENRES.iter().map(|genre| genre.to_string()));
        all.into_iter().collect()
    }
}
