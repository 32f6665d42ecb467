use std::sync::Arc;

use async_trait::async_trait;

use super::errors::MovieError;
use super::models::Movie;
use super::models::MovieDetails;
use super::models::MovieId;
use super::ports::MovieRepository;
use super::ports::MovieServicePort;

/// Concrete implementation of MovieServicePort.
///
/// A thin layer over the catalog store. Generic over repository for testability.
pub struct MovieService<MR>
where
    MR: MovieRepository,
{
    movie_repository: Arc<MR>,
}

impl<MR> MovieService<MR>
where
    MR: MovieRepository,
{
    pub fn new(movie_repository: Arc<MR>) -> Self {
        Self { movie_repository }
    }
}

#[async_trait]
impl<MR> MovieServicePort for MovieService<MR>
where
    MR: MovieRepository,
{
    async fn create_movie(&self, details: MovieDetails) -> Result<Movie, MovieError> {
        let movie = self.movie_repository.create(details).await?;
        tracing::info!(movie_id = %movie.id, title = %movie.title, "Movie created");
        Ok(movie)
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError> {
        self.movie_repository.list_all().await
    }

    async fn get_movie(&self, id: MovieId) -> Result<Movie, MovieError> {
        self.movie_repository
            .find_by_id(id)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn update_movie(&self, id: MovieId, details: MovieDetails) -> Result<Movie, MovieError> {
        let movie = self
            .movie_repository
            .update(Movie::from_details(id, details))
            .await?;
        tracing::info!(movie_id = %movie.id, "Movie updated");
        Ok(movie)
    }

    async fn delete_movie(&self, id: MovieId) -> Result<(), MovieError> {
        self.movie_repository.delete(id).await?;
        tracing::info!(movie_id = %id, "Movie deleted");
        Ok(())
    }
}
