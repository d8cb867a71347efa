use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::AuthenticatedUser;
use crate::response::ApiResponse;

use super::filter::ExpenseFilter;
use super::models::{
    ExpenseData, ExpenseIdPath, ExpenseInputDto, ExpenseListData, ExpenseResponse,
    ListExpensesQuery, StatsData, StatsQuery,
};
use super::paging::{paginate, sort_expenses, SortKey, SortOrder};
use super::service::ExpenseService;

/// GET /expenses - List expenses with filters, sorting, and pagination
#[utoipa::path(
    get,
    path = "/expenses",
    tag = "Expenses",
    params(ListExpensesQuery),
    responses(
        (status = 200, description = "One page of matching expenses, wrapped in the success envelope", body = ExpenseListData),
        (status = 400, description = "Invalid filter or paging parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/expenses")]
pub async fn list_expenses(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    query: web::Query<ListExpensesQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let filter = ExpenseFilter::from_list_query(&query)?;
    let mut expenses = ExpenseService::list(pool.get_ref(), auth.user_id, &filter).await?;

    // Sorting and pagination run over the whole filtered set in application
    // memory, not in the storage layer
    sort_expenses(
        &mut expenses,
        SortKey::parse(&query.sort_by),
        SortOrder::parse(&query.sort_order),
    );
    let (page_items, pagination) = paginate(expenses, query.page, query.limit);

    let expenses: Vec<ExpenseResponse> = page_items.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::data(ExpenseListData {
        expenses,
        pagination,
    })))
}

/// GET /expenses/stats - Aggregate statistics over a date range
#[utoipa::path(
    get,
    path = "/expenses/stats",
    tag = "Expenses",
    params(StatsQuery),
    responses(
        (status = 200, description = "Overall summary and per-category breakdown", body = StatsData),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/expenses/stats")]
pub async fn get_stats(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = ExpenseFilter::from_stats_query(&query);
    let stats = ExpenseService::stats(pool.get_ref(), auth.user_id, &filter).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(StatsData { stats })))
}

/// GET /expenses/{id} - Get a single expense
#[utoipa::path(
    get,
    path = "/expenses/{id}",
    tag = "Expenses",
    params(ExpenseIdPath),
    responses(
        (status = 200, description = "Expense details", body = ExpenseData),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/expenses/{id}")]
pub async fn get_expense(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    path: web::Path<ExpenseIdPath>,
) -> Result<HttpResponse, AppError> {
    let expense = ExpenseService::get(pool.get_ref(), auth.user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(ExpenseData {
        expense: expense.into(),
    })))
}

/// POST /expenses - Create a new expense
#[utoipa::path(
    post,
    path = "/expenses",
    tag = "Expenses",
    request_body = ExpenseInputDto,
    responses(
        (status = 201, description = "Expense created", body = ExpenseData),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[post("/expenses")]
pub async fn create_expense(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    body: web::Json<ExpenseInputDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;

    let expense =
        ExpenseService::create(pool.get_ref(), auth.user_id, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        ExpenseData {
            expense: expense.into(),
        },
        "Expense created successfully",
    )))
}

/// PUT /expenses/{id} - Replace all fields of an expense
#[utoipa::path(
    put,
    path = "/expenses/{id}",
    tag = "Expenses",
    params(ExpenseIdPath),
    request_body = ExpenseInputDto,
    responses(
        (status = 200, description = "Expense updated", body = ExpenseData),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[put("/expenses/{id}")]
pub async fn update_expense(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    path: web::Path<ExpenseIdPath>,
    body: web::Json<ExpenseInputDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;

    let expense =
        ExpenseService::update(pool.get_ref(), auth.user_id, path.id, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        ExpenseData {
            expense: expense.into(),
        },
        "Expense updated successfully",
    )))
}

/// DELETE /expenses/{id} - Delete an expense permanently
#[utoipa::path(
    delete,
    path = "/expenses/{id}",
    tag = "Expenses",
    params(ExpenseIdPath),
    responses(
        (status = 200, description = "Expense deleted"),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[delete("/expenses/{id}")]
pub async fn delete_expense(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    path: web::Path<ExpenseIdPath>,
) -> Result<HttpResponse, AppError> {
    ExpenseService::delete(pool.get_ref(), auth.user_id, path.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Expense deleted successfully")))
}
