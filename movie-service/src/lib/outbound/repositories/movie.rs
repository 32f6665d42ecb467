use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieDetails;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::MovieTitle;
use crate::domain::movie::ports::MovieRepository;

pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_movie(row: PgRow) -> Result<Movie, MovieError> {
        let title: String = row.try_get("title").map_err(Self::database_error)?;
        let title = MovieTitle::new(title)
            .map_err(|e| MovieError::DatabaseError(format!("Stored title is invalid: {}", e)))?;

        Ok(Movie {
            id: MovieId(row.try_get("id").map_err(Self::database_error)?),
            title,
            director: row.try_get("director").map_err(Self::database_error)?,
            year: row.try_get("year").map_err(Self::database_error)?,
            plot: row.try_get("plot").map_err(Self::database_error)?,
        })
    }

    fn database_error(e: sqlx::Error) -> MovieError {
        MovieError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn create(&self, details: MovieDetails) -> Result<Movie, MovieError> {
        let row = sqlx::query(
            r#"
            INSERT INTO movies (title, director, year, plot)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(details.title.as_str())
        .bind(&details.director)
        .bind(details.year)
        .bind(&details.plot)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::database_error)?;

        let id = row.try_get("id").map_err(Self::database_error)?;

        Ok(Movie::from_details(MovieId(id), details))
    }

    async fn list_all(&self) -> Result<Vec<Movie>, MovieError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, director, year, plot
            FROM movies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::database_error)?;

        rows.into_iter().map(Self::row_to_movie).collect()
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, MovieError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, director, year, plot
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::database_error)?;

        row.map(Self::row_to_movie).transpose()
    }

    async fn update(&self, movie: Movie) -> Result<Movie, MovieError> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = $2, director = $3, year = $4, plot = $5
            WHERE id = $1
            "#,
        )
        .bind(movie.id.0)
        .bind(movie.title.as_str())
        .bind(&movie.director)
        .bind(movie.year)
        .bind(&movie.plot)
        .execute(&self.pool)
        .await
        .map_err(Self::database_error)?;

        if result.rows_affected() == 0 {
            return Err(MovieError::NotFound(movie.id));
        }

        Ok(movie)
    }

    async fn delete(&self, id: MovieId) -> Result<(), MovieError> {
        let result = sqlx::query(
            r#"
            DELETE FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(Self::database_error)?;

        if result.rows_affected() == 0 {
            return Err(MovieError::NotFound(id));
        }

        Ok(())
    }
}
