use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::MovieData;
use crate::domain::movie::models::MovieId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_movie(
    State(state): State<AppState>,
    movie_id: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<MovieData>, ApiError> {
    let Path(movie_id) = movie_id.map_err(ApiError::invalid_movie_id)?;

    state
        .movie_service
        .get_movie(MovieId(movie_id))
        .await
        .map_err(ApiError::from)
        .map(|ref movie| ApiSuccess::new(StatusCode::OK, movie.into()))
}
