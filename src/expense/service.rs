use sqlx::PgPool;
use uuid::Uuid;

use super::filter::ExpenseFilter;
use super::models::{Expense, ExpenseInputDto, ExpenseStats};
use super::stats::compute_stats;
use crate::errors::AppError;

/// Service layer for expense data access. Every operation takes the owning
/// user's id; an expense belonging to another user is indistinguishable
/// from one that does not exist.
pub struct ExpenseService;

impl ExpenseService {
    /// List every expense owned by `user_id` that satisfies the predicate.
    /// Rows come back in storage order (date, then creation time, both
    /// descending); sorting for presentation happens in the paging stage.
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        filter: &ExpenseFilter,
    ) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, title, amount, category, date, description,
                   created_at, updated_at
            FROM expenses
            WHERE user_id = $1
              AND ($2::text IS NULL OR category = $2)
              AND ($3::date IS NULL OR date >= $3)
              AND ($4::date IS NULL OR date <= $4)
              AND ($5::numeric IS NULL OR amount >= $5)
              AND ($6::numeric IS NULL OR amount <= $6)
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(filter.category.as_ref().map(|c| c.as_str()))
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(filter.min_amount)
        .bind(filter.max_amount)
        .fetch_all(pool)
        .await?;

        Ok(expenses)
    }

    /// Get a single expense by ID, scoped to its owner
    pub async fn get(
        pool: &PgPool,
        user_id: Uuid,
        expense_id: Uuid,
    ) -> Result<Expense, AppError> {
        sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, title, amount, category, date, description,
                   created_at, updated_at
            FROM expenses
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(expense_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Expense not found".to_string()))
    }

    /// Create an expense for `user_id`, assigning id and timestamps
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        dto: ExpenseInputDto,
    ) -> Result<Expense, AppError> {
        let (title, description) = Self::sanitize(&dto)?;

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (user_id, title, amount, category, date, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, title, amount, category, date, description,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&title)
        .bind(dto.amount)
        .bind(dto.category.as_str())
        .bind(dto.date)
        .bind(&description)
        .fetch_one(pool)
        .await?;

        Ok(expense)
    }

    /// Replace every mutable field of an owned expense. The ownership check
    /// runs first; a concurrent delete between the check and the write
    /// surfaces as not-found.
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        expense_id: Uuid,
        dto: ExpenseInputDto,
    ) -> Result<Expense, AppError> {
        Self::get(pool, user_id, expense_id).await?;

        let (title, description) = Self::sanitize(&dto)?;

        sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET title = $3, amount = $4, category = $5, date = $6,
                description = $7, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, amount, category, date, description,
                      created_at, updated_at
            "#,
        )
        .bind(expense_id)
        .bind(user_id)
        .bind(&title)
        .bind(dto.amount)
        .bind(dto.category.as_str())
        .bind(dto.date)
        .bind(&description)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Expense not found".to_string()))
    }

    /// Delete an owned expense permanently
    pub async fn delete(
        pool: &PgPool,
        user_id: Uuid,
        expense_id: Uuid,
    ) -> Result<(), AppError> {
        Self::get(pool, user_id, expense_id).await?;

        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
            .bind(expense_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Expense not found".to_string()));
        }

        Ok(())
    }

    /// Aggregate statistics over the owner's expenses in the given date
    /// range, independent of pagination
    pub async fn stats(
        pool: &PgPool,
        user_id: Uuid,
        filter: &ExpenseFilter,
    ) -> Result<ExpenseStats, AppError> {
        let expenses = Self::list(pool, user_id, filter).await?;
        Ok(compute_stats(&expenses))
    }

    /// Trim free-text fields; a title that is whitespace-only is rejected
    /// even though it passed the raw length check.
    fn sanitize(dto: &ExpenseInputDto) -> Result<(String, Option<String>), AppError> {
        let title = dto.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }

        let description = dto
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok((title, description))
    }
}
