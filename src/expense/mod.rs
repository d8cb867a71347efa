pub mod filter;
pub mod handlers;
pub mod models;
pub mod paging;
pub mod service;
pub mod stats;

// Re-export handlers for route registration in main.rs
pub use handlers::{
    create_expense, delete_expense, get_expense, get_stats, list_expenses, update_expense,
};
