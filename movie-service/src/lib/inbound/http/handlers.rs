use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::domain::movie::errors::MovieError;
use crate::domain::user::models::Identity;
use crate::user::errors::UserError;

pub mod login;
pub mod me;
pub mod movies;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// Body-level rejection for the identity endpoints.
    pub fn invalid_request(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest("invalid request data".to_string())
    }

    /// Body-level rejection for the movie endpoints.
    pub fn invalid_movie(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected movie body");
        ApiError::BadRequest("invalid movie data".to_string())
    }

    pub fn invalid_movie_id(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected movie id");
        ApiError::BadRequest("invalid movie ID".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUsername(_) | UserError::InvalidPassword(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::NotFound(_) => ApiError::NotFound("user not found".to_string()),
            UserError::UserExists(_) => ApiError::Conflict("username already taken".to_string()),
            UserError::InvalidCredentials => {
                ApiError::Unauthorized("invalid username or password".to_string())
            }
            UserError::DatabaseError(_) | UserError::Internal(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::InvalidTitle(_) => ApiError::BadRequest(err.to_string()),
            MovieError::NotFound(_) => ApiError::NotFound("movie not found".to_string()),
            MovieError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Public view of a user: id and username only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub id: i64,
    pub username: String,
}

impl From<&Identity> for IdentityData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.0,
            username: identity.username.as_str().to_string(),
        }
    }
}
