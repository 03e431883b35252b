use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{User, UserType};

/// Only `sub` is authoritative: the extractor reloads the user from the
/// database. `username` and `user_type` are informational, for clients
/// reading the token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub username: String,
    pub user_type: UserType,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(secret: &str, user: &User, ttl: Duration) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        user_type: user.user_type,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token expired".to_string())
        }
        jsonwebtoken::errors::ErrorKind::InvalidToken => {
            AppError::Unauthorized("Invalid token".to_string())
        }
        _ => AppError::Unauthorized(format!("Token validation failed: {}", e)),
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 42,
            username: "alice".to_string(),
            user_type: UserType::Student,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_issue_and_decode() {
        let token = issue_token("secret", &user(), Duration::minutes(5)).expect("Failed to issue token");
        let claims = decode_token("secret", &token).expect("Failed to decode token");

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.user_type, UserType::Student);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token("secret", &user(), Duration::minutes(5)).unwrap();
        let result = decode_token("other-secret", &token);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        // jsonwebtoken allows 60s of leeway by default
        let token = issue_token("secret", &user(), Duration::minutes(-5)).unwrap();
        match decode_token("secret", &token) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Token expired"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            decode_token("secret", "not-a-jwt"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
