use serde::Deserialize;
use serde::Serialize;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieDetails;
use crate::domain::movie::models::MovieTitle;

pub mod create_movie;
pub mod delete_movie;
pub mod get_movie;
pub mod list_movies;
pub mod update_movie;

pub use create_movie::create_movie;
pub use delete_movie::delete_movie;
pub use get_movie::get_movie;
pub use list_movies::list_movies;
pub use update_movie::update_movie;

/// Body accepted by create and update. Only the title is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieRequest {
    title: String,
    #[serde(default)]
    director: String,
    #[serde(default)]
    year: i32,
    #[serde(default)]
    plot: String,
}

impl MovieRequest {
    fn try_into_details(self) -> Result<MovieDetails, MovieError> {
        let title = MovieTitle::new(self.title)?;
        Ok(MovieDetails::new(title, self.director, self.year, self.plot))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieData {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub plot: String,
}

impl From<&Movie> for MovieData {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.0,
            title: movie.title.as_str().to_string(),
            director: movie.director.clone(),
            year: movie.year,
            plot: movie.plot.clone(),
        }
    }
}
