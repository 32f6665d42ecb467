use async_trait::async_trait;

use super::errors::MovieError;
use super::models::Movie;
use super::models::MovieDetails;
use super::models::MovieId;

/// Port for movie catalog operations.
#[async_trait]
pub trait MovieServicePort: Send + Sync + 'static {
    async fn create_movie(&self, details: MovieDetails) -> Result<Movie, MovieError>;

    /// List every movie, ordered by id.
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError>;

    /// # Errors
    /// * `NotFound` - No movie with this id
    async fn get_movie(&self, id: MovieId) -> Result<Movie, MovieError>;

    /// Replace every field of an existing movie.
    ///
    /// # Errors
    /// * `NotFound` - No movie with this id
    async fn update_movie(&self, id: MovieId, details: MovieDetails) -> Result<Movie, MovieError>;

    /// # Errors
    /// * `NotFound` - No movie with this id
    async fn delete_movie(&self, id: MovieId) -> Result<(), MovieError>;
}

/// Persistence operations for the movie catalog.
#[async_trait]
pub trait MovieRepository: Send + Sync + 'static {
    /// Persist a new movie; the store assigns the id.
    async fn create(&self, details: MovieDetails) -> Result<Movie, MovieError>;

    async fn list_all(&self) -> Result<Vec<Movie>, MovieError>;

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, MovieError>;

    /// Overwrite a stored movie.
    ///
    /// # Errors
    /// * `NotFound` - No row matched `movie.id`
    async fn update(&self, movie: Movie) -> Result<Movie, MovieError>;

    /// # Errors
    /// * `NotFound` - No row matched `id`
    async fn delete(&self, id: MovieId) -> Result<(), MovieError>;
}
