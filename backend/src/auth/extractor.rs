use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use crate::auth::decode_token;
use crate::db::repository;
use crate::error::AppError;
use crate::models::UserType;
use crate::state::AppState;

/// The caller behind a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub user_type: UserType,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization format".to_string()))?;

        let claims = decode_token(&state.jwt_secret, token)?;

        // The token may outlive the account
        let user = repository::find_user_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        debug!("authenticated {} {} ({})", user.user_type, user.username, user.id);

        Ok(AuthUser {
            id: user.id,
            username: user.username,
            user_type: user.user_type,
        })
    }
}
