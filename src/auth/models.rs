use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ============================================================================
// User Models
// ============================================================================

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validate password complexity: at least one uppercase, one lowercase, and one digit
fn validate_password_complexity(password: &str) -> Result<(), ValidationError> {
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_lowercase && has_uppercase && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("password_complexity"))
    }
}

/// Request body for user registration
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    /// Display name (2-50 chars)
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    #[schema(example = "John Doe")]
    pub name: String,
    /// User's email address
    #[validate(email(message = "Please provide a valid email"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password (min 6 chars, must include uppercase, lowercase, and digit)
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    #[validate(custom(
        function = "validate_password_complexity",
        message = "Password must contain at least one lowercase letter, one uppercase letter, and one number"
    ))]
    #[schema(example = "Password123")]
    pub password: String,
}

/// Request body for user login
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginDto {
    /// User's email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User's password
    #[schema(example = "Password123")]
    pub password: String,
}

/// Request body for updating the user's profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    /// Display name (2-50 chars)
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    #[schema(example = "John Doe")]
    pub name: String,
    /// User's email address
    #[validate(email(message = "Please provide a valid email"))]
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// User information returned in responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    /// Unique user identifier
    pub id: Uuid,
    /// Display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// User's email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserResponseDto {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Token Models
// ============================================================================

/// JWT access token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,      // User ID
    pub email: String,  // User email
    pub name: String,   // User display name
    pub iat: usize,     // Issued at
    pub exp: usize,     // Expiration
}

/// `data` payload returned by register and login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthData {
    /// JWT bearer token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// The authenticated user
    pub user: UserResponseDto,
}

/// `data` payload carrying a single user
#[derive(Debug, Serialize, ToSchema)]
pub struct UserData {
    pub user: UserResponseDto,
}
