use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::MovieData;
use super::MovieRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_movie(
    State(state): State<AppState>,
    payload: Result<Json<MovieRequest>, JsonRejection>,
) -> Result<ApiSuccess<MovieData>, ApiError> {
    let Json(body) = payload.map_err(ApiError::invalid_movie)?;

    state
        .movie_service
        .create_movie(body.try_into_details()?)
        .await
        .map_err(ApiError::from)
        .map(|ref movie| ApiSuccess::new(StatusCode::CREATED, movie.into()))
}
