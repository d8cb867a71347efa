use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::models::{Category, ListExpensesQuery, StatsQuery};
use crate::errors::AppError;

/// Normalized filter predicate. Only the clauses that were supplied
/// constrain the query; all clauses combine with logical AND.
#[derive(Debug, Default, Clone)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    /// Inclusive lower bound on date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on date
    pub end_date: Option<NaiveDate>,
    /// Inclusive lower bound on amount
    pub min_amount: Option<Decimal>,
    /// Inclusive upper bound on amount
    pub max_amount: Option<Decimal>,
}

impl ExpenseFilter {
    /// Build the predicate from list query parameters. The category clause
    /// is dropped for the "all" sentinel (and for an empty value); any other
    /// unknown category name is rejected.
    pub fn from_list_query(query: &ListExpensesQuery) -> Result<Self, AppError> {
        let category = match query.category.as_deref() {
            None | Some("") | Some("all") => None,
            Some(name) => Some(
                Category::parse(name)
                    .ok_or_else(|| AppError::validation("Please select a valid category"))?,
            ),
        };

        Ok(Self {
            category,
            start_date: query.start_date,
            end_date: query.end_date,
            min_amount: query.min_amount,
            max_amount: query.max_amount,
        })
    }

    /// Statistics are filtered by date range only; category and amount
    /// clauses never apply to them.
    pub fn from_stats_query(query: &StatsQuery) -> Self {
        Self {
            start_date: query.start_date,
            end_date: query.end_date,
            ..Self::default()
        }
    }
}
