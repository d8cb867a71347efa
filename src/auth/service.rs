use secrecy::Secret;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;

use super::jwt::create_token;
use super::models::{AuthData, CreateUserDto, UpdateProfileDto, User, UserResponseDto};
use super::password::{hash_password, verify_password};

/// Authentication service handling registration, login, and profile logic
pub struct AuthService;

impl AuthService {
    /// Register a new user and return a bearer token with the user
    pub async fn register(
        pool: &PgPool,
        jwt_secret: &Secret<String>,
        dto: &CreateUserDto,
    ) -> Result<AuthData, AppError> {
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
                .bind(&dto.email)
                .fetch_one(pool)
                .await?;

        if existing > 0 {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(&dto.email)
        .bind(&password_hash)
        .fetch_one(pool)
        .await?;

        let token = create_token(&user, jwt_secret)?;

        Ok(AuthData {
            token,
            user: UserResponseDto::from_user(&user),
        })
    }

    /// Authenticate by email and password
    pub async fn login(
        pool: &PgPool,
        jwt_secret: &Secret<String>,
        email: &str,
        password: &str,
    ) -> Result<AuthData, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let is_valid = verify_password(password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let token = create_token(&user, jwt_secret)?;

        Ok(AuthData {
            token,
            user: UserResponseDto::from_user(&user),
        })
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))
    }

    /// Update the user's name and email. The new email must not belong to
    /// another account.
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        dto: &UpdateProfileDto,
    ) -> Result<User, AppError> {
        let taken = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE email = $1 AND id <> $2",
        )
        .bind(&dto.email)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        if taken > 0 {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, email = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(dto.name.trim())
        .bind(&dto.email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))
    }
}
