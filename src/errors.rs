use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    ValidationError {
        message: String,
        errors: Vec<FieldError>,
    },
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    InternalError(String),
}

impl AppError {
    /// A validation error with a single message and no per-field detail
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
            errors: Vec::new(),
        }
    }
}

/// One field-level validation failure
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending field
    #[schema(example = "amount")]
    pub field: String,
    /// What was wrong with it
    #[schema(example = "Amount must be a positive number greater than 0")]
    pub message: String,
}

/// Standard error response format
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false for errors
    #[schema(example = false)]
    pub success: bool,
    /// Human-readable error message
    #[schema(example = "Validation failed")]
    pub message: String,
    /// Per-field validation messages, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError { message, .. } => write!(f, "Validation error: {message}"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not found: {msg}"),
            AppError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            AppError::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, message, errors) = match self {
            AppError::ValidationError { message, errors } => (
                actix_web::http::StatusCode::BAD_REQUEST,
                message.clone(),
                if errors.is_empty() {
                    None
                } else {
                    Some(errors.clone())
                },
            ),
            AppError::Unauthorized(msg) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                msg.clone(),
                None,
            ),
            AppError::NotFound(msg) => {
                (actix_web::http::StatusCode::NOT_FOUND, msg.clone(), None)
            }
            AppError::Conflict(msg) => {
                (actix_web::http::StatusCode::CONFLICT, msg.clone(), None)
            }
            AppError::InternalError(msg) => {
                // Log the actual error for debugging, but don't expose to client
                error!("Internal error: {msg}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        HttpResponse::build(status).json(ErrorResponse {
            success: false,
            message,
            errors,
        })
    }
}

// Convenience conversion from sqlx::Error
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            _ => AppError::InternalError(err.to_string()),
        }
    }
}

// Map validator output to per-field messages
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let errors = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();

        AppError::ValidationError {
            message: "Validation failed".to_string(),
            errors,
        }
    }
}
