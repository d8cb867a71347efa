use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::models::{
    AuthData, CreateUserDto, LoginDto, UpdateProfileDto, UserData, UserResponseDto,
};
use crate::errors::{ErrorResponse, FieldError};
use crate::expense::models::{
    Category, CategoryStats, ExpenseData, ExpenseInputDto, ExpenseListData, ExpenseResponse,
    ExpenseStats, OverallStats, PaginationMeta, StatsData,
};

/// Security scheme modifier for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT access token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Expense Tracker API",
        version = "1.0.0",
        description = "RESTful API for personal expense tracking",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Authentication and profile management"),
        (name = "Expenses", description = "Owner-scoped expense management and statistics")
    ),
    paths(
        // Auth endpoints
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::me,
        crate::auth::handlers::update_profile,
        // Expense endpoints
        crate::expense::handlers::list_expenses,
        crate::expense::handlers::get_stats,
        crate::expense::handlers::get_expense,
        crate::expense::handlers::create_expense,
        crate::expense::handlers::update_expense,
        crate::expense::handlers::delete_expense,
    ),
    components(
        schemas(
            // Error response
            ErrorResponse,
            FieldError,
            // Auth schemas
            CreateUserDto,
            LoginDto,
            UpdateProfileDto,
            UserResponseDto,
            AuthData,
            UserData,
            // Expense schemas
            Category,
            ExpenseInputDto,
            ExpenseResponse,
            ExpenseData,
            ExpenseListData,
            PaginationMeta,
            OverallStats,
            CategoryStats,
            ExpenseStats,
            StatsData,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;
