use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::MovieData;
use super::MovieRequest;
use crate::domain::movie::models::MovieId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_movie(
    State(state): State<AppState>,
    movie_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MovieRequest>, JsonRejection>,
) -> Result<ApiSuccess<MovieData>, ApiError> {
    let Path(movie_id) = movie_id.map_err(ApiError::invalid_movie_id)?;
    let Json(body) = payload.map_err(ApiError::invalid_movie)?;

    state
        .movie_service
        .update_movie(MovieId(movie_id), body.try_into_details()?)
        .await
        .map_err(ApiError::from)
        .map(|ref movie| ApiSuccess::new(StatusCode::OK, movie.into()))
}
