use thiserror::Error;

use super::models::MovieId;

/// Error for MovieTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MovieTitleError {
    #[error("Movie title is empty")]
    Empty,

    #[error("Movie title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all movie-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MovieError {
    #[error("Invalid movie title: {0}")]
    InvalidTitle(#[from] MovieTitleError),

    #[error("Movie not found: {0}")]
    NotFound(MovieId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
