use actix_web::HttpRequest;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};

use crate::errors::AppError;

use super::models::{TokenClaims, User};

/// Bearer token lifetime; there is no refresh flow, clients log in again
pub const TOKEN_EXPIRY_DAYS: i64 = 7;

/// Create a JWT for a user
pub fn create_token(user: &User, jwt_secret: &Secret<String>) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + Duration::days(TOKEN_EXPIRY_DAYS);

    let claims = TokenClaims {
        sub: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Failed to create token: {e}")))
}

/// Decode and validate a JWT
pub fn decode_token(token: &str, jwt_secret: &Secret<String>) -> Result<TokenClaims, AppError> {
    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {e}")))
}

/// Extract Bearer token from Authorization header
pub fn extract_token(req: &HttpRequest) -> Result<String, AppError> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or_else(|| {
            AppError::Unauthorized("Missing or invalid Authorization header".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn token_round_trips_to_the_same_claims() {
        let secret = Secret::new("unit-test-secret".to_string());
        let user = test_user();

        let token = create_token(&user, &secret).expect("create token");
        let claims = decode_token(&token, &secret).expect("decode token");

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.name, user.name);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let user = test_user();
        let token = create_token(&user, &Secret::new("secret-a".to_string())).unwrap();

        let result = decode_token(&token, &Secret::new("secret-b".to_string()));
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn malformed_token_is_rejected() {
        let secret = Secret::new("unit-test-secret".to_string());
        let result = decode_token("definitely.not.ajwt", &secret);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
