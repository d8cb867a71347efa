use super::models::{Expense, PaginationMeta};

/// Recognized sort keys for the expense list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Amount,
    Title,
}

impl SortKey {
    /// Unknown keys return None: the sequence is then left in its
    /// pre-sort (storage) order rather than treated as an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "date" => Some(SortKey::Date),
            "amount" => Some(SortKey::Amount),
            "title" => Some(SortKey::Title),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than "desc" sorts ascending
    pub fn parse(s: &str) -> Self {
        match s {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// Sort the full filtered set in place. The sort is stable, so repeated
/// requests over unchanged data return identical ordering. Titles compare
/// case-insensitively.
pub fn sort_expenses(expenses: &mut [Expense], key: Option<SortKey>, order: SortOrder) {
    let Some(key) = key else {
        return;
    };

    expenses.sort_by(|a, b| {
        let ord = match key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Amount => a.amount.cmp(&b.amount),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

/// Slice out one 1-based page of the sorted sequence and report the page
/// position. A page past the end of the sequence is empty, not an error.
pub fn paginate<T>(items: Vec<T>, page: i64, limit: i64) -> (Vec<T>, PaginationMeta) {
    let total = items.len() as i64;
    let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };

    let start = (page - 1) * limit;
    let page_items = if start < 0 || start >= total {
        Vec::new()
    } else {
        items
            .into_iter()
            .skip(start as usize)
            .take(limit as usize)
            .collect()
    };

    let meta = PaginationMeta {
        current_page: page,
        total_pages,
        total_expenses: total,
        has_next_page: page < total_pages,
        has_prev_page: page > 1,
    };

    (page_items, meta)
}
