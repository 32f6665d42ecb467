use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::movie::models::MovieId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_movie(
    State(state): State<AppState>,
    movie_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(movie_id) = movie_id.map_err(ApiError::invalid_movie_id)?;

    state.movie_service.delete_movie(MovieId(movie_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
