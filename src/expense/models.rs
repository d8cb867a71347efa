use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Fixed expense category set. Stored as text; typed here so that an invalid
/// category cannot get past the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Gifts & Donations")]
    GiftsAndDonations,
    #[serde(rename = "Business")]
    Business,
    #[serde(rename = "Home Loans")]
    HomeLoans,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Healthcare => "Healthcare",
            Category::Travel => "Travel",
            Category::Education => "Education",
            Category::PersonalCare => "Personal Care",
            Category::GiftsAndDonations => "Gifts & Donations",
            Category::Business => "Business",
            Category::HomeLoans => "Home Loans",
            Category::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Food & Dining" => Some(Category::FoodAndDining),
            "Transportation" => Some(Category::Transportation),
            "Shopping" => Some(Category::Shopping),
            "Entertainment" => Some(Category::Entertainment),
            "Bills & Utilities" => Some(Category::BillsAndUtilities),
            "Healthcare" => Some(Category::Healthcare),
            "Travel" => Some(Category::Travel),
            "Education" => Some(Category::Education),
            "Personal Care" => Some(Category::PersonalCare),
            "Gifts & Donations" => Some(Category::GiftsAndDonations),
            "Business" => Some(Category::Business),
            "Home Loans" => Some(Category::HomeLoans),
            "Other" => Some(Category::Other),
            _ => None,
        }
    }
}

/// Validate that amount is positive
fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(ValidationError::new("amount_must_be_positive"));
    }
    Ok(())
}

/// Validate that the expense date is not in the future
fn validate_date_not_future(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Utc::now().date_naive() {
        return Err(ValidationError::new("date_in_future"));
    }
    Ok(())
}

/// Database model for expenses
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Expense information returned in responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    /// Unique expense identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Short label for the expense
    #[schema(example = "Weekly groceries")]
    pub title: String,
    /// Expense amount (always positive)
    #[schema(example = 42.50)]
    pub amount: Decimal,
    /// Category name
    #[schema(example = "Food & Dining")]
    pub category: String,
    /// Date of the expense
    pub date: NaiveDate,
    /// Optional longer note
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResponse {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            title: e.title,
            amount: e.amount,
            category: e.category,
            date: e.date,
            description: e.description,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Request body for creating an expense or fully replacing one on update
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInputDto {
    /// Short label (1-100 chars)
    #[validate(length(
        min = 1,
        max = 100,
        message = "Title must be between 1 and 100 characters"
    ))]
    #[schema(example = "Weekly groceries")]
    pub title: String,

    /// Expense amount (must be positive)
    #[validate(custom(
        function = "validate_positive_amount",
        message = "Amount must be a positive number greater than 0"
    ))]
    #[schema(example = 42.50)]
    pub amount: Decimal,

    /// One of the fixed category names
    pub category: Category,

    /// Date of the expense (must not be in the future)
    #[validate(custom(
        function = "validate_date_not_future",
        message = "Date cannot be in the future"
    ))]
    pub date: NaiveDate,

    /// Optional longer note (max 500 chars)
    #[validate(length(max = 500, message = "Description cannot be more than 500 characters"))]
    pub description: Option<String>,
}

/// Query parameters for listing expenses
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListExpensesQuery {
    /// Filter by category name; "all" (or absent) means no constraint
    #[param(example = "Food & Dining")]
    pub category: Option<String>,
    /// Inclusive lower bound on date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on date
    pub end_date: Option<NaiveDate>,
    /// Inclusive lower bound on amount
    pub min_amount: Option<Decimal>,
    /// Inclusive upper bound on amount
    pub max_amount: Option<Decimal>,

    /// 1-based page number
    #[validate(range(min = 1))]
    #[serde(default = "default_page")]
    #[param(example = 1)]
    pub page: i64,

    /// Page size (1-100)
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    #[param(example = 10)]
    pub limit: i64,

    /// Sort key: date, amount, or title
    #[serde(default = "default_sort_by")]
    #[param(example = "date")]
    pub sort_by: String,

    /// Sort direction: asc or desc
    #[serde(default = "default_sort_order")]
    #[param(example = "desc")]
    pub sort_order: String,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

fn default_sort_by() -> String {
    "date".to_string()
}

fn default_sort_order() -> String {
    "desc".to_string()
}

/// Query parameters for statistics (date range only)
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    /// Inclusive lower bound on date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on date
    pub end_date: Option<NaiveDate>,
}

/// Page position metadata reported alongside every list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[schema(example = 1)]
    pub current_page: i64,
    #[schema(example = 3)]
    pub total_pages: i64,
    /// Total matching count before pagination
    #[schema(example = 25)]
    pub total_expenses: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// Summary figures over the whole filtered set
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    #[schema(example = 1234.56)]
    pub total_amount: Decimal,
    #[schema(example = 42)]
    pub total_expenses: i64,
    pub avg_amount: Decimal,
    pub max_amount: Decimal,
    pub min_amount: Decimal,
}

/// Per-category breakdown entry
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    #[schema(example = "Food & Dining")]
    pub category: String,
    pub total_amount: Decimal,
    pub count: i64,
}

/// Aggregate statistics: overall summary plus per-category breakdown,
/// ordered by total amount descending
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    pub overall: OverallStats,
    pub by_category: Vec<CategoryStats>,
}

/// `data` payload carrying a single expense
#[derive(Debug, Serialize, ToSchema)]
pub struct ExpenseData {
    pub expense: ExpenseResponse,
}

/// `data` payload for list responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ExpenseListData {
    pub expenses: Vec<ExpenseResponse>,
    pub pagination: PaginationMeta,
}

/// `data` payload for the statistics endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsData {
    pub stats: ExpenseStats,
}

/// Path parameters for expense ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct ExpenseIdPath {
    /// Expense UUID
    pub id: Uuid,
}
