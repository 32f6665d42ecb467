use std::sync::Arc;

use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::domain::user::models::UserId;

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Middleware that validates bearer tokens and adds user info to request extensions.
///
/// Verification is stateless: the store is never consulted.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = authenticator
        .validate_token(token, Utc::now())
        .map_err(|e| {
            tracing::warn!(error = %e, "Token verification failed");
            unauthorized("invalid or expired token")
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(claims.user_id),
        username: claims.username,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("authorization required"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("invalid authorization header"))?;

    match auth_str.split_whitespace().collect::<Vec<_>>().as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") => Ok(*token),
        _ => Err(unauthorized("invalid authorization header")),
    }
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
}
