use std::fmt;

use super::errors::MovieTitleError;

/// Movie entity as held by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: MovieTitle,
    pub director: String,
    pub year: i32,
    pub plot: String,
}

impl Movie {
    pub fn from_details(id: MovieId, details: MovieDetails) -> Self {
        let MovieDetails {
            title,
            director,
            year,
            plot,
        } = details;

        Self {
            id,
            title,
            director,
            year,
            plot,
        }
    }
}

/// Movie unique identifier type, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MovieId(pub i64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Movie title value type
///
/// Ensures the title is 1-255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovieTitle(String);

impl MovieTitle {
    const MAX_LENGTH: usize = 255;

    pub fn new(title: String) -> Result<Self, MovieTitleError> {
        let length = title.chars().count();
        if title.trim().is_empty() {
            Err(MovieTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(MovieTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Everything about a movie except its id.
///
/// Used both to create a movie and to replace an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetails {
    pub title: MovieTitle,
    pub director: String,
    pub year: i32,
    pub plot: String,
}

impl MovieDetails {
    pub fn new(title: MovieTitle, director: String, year: i32, plot: String) -> Self {
        Self {
            title,
            director,
            year,
            plot,
        }
    }
}
