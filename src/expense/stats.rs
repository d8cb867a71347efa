use std::collections::HashMap;

use rust_decimal::Decimal;

use super::models::{CategoryStats, Expense, ExpenseStats, OverallStats};

/// Compute aggregate statistics over a filtered expense set.
///
/// Two explicit passes: one accumulating the overall sum/count/min/max
/// (the average derived from sum and count), one grouping by category.
/// All arithmetic stays in `Decimal`; an empty set yields all-zero overall
/// figures and an empty breakdown.
pub fn compute_stats(expenses: &[Expense]) -> ExpenseStats {
    if expenses.is_empty() {
        return ExpenseStats {
            overall: OverallStats {
                total_amount: Decimal::ZERO,
                total_expenses: 0,
                avg_amount: Decimal::ZERO,
                max_amount: Decimal::ZERO,
                min_amount: Decimal::ZERO,
            },
            by_category: Vec::new(),
        };
    }

    let mut total_amount = Decimal::ZERO;
    let mut max_amount = expenses[0].amount;
    let mut min_amount = expenses[0].amount;
    for expense in expenses {
        total_amount += expense.amount;
        if expense.amount > max_amount {
            max_amount = expense.amount;
        }
        if expense.amount < min_amount {
            min_amount = expense.amount;
        }
    }
    let total_expenses = expenses.len() as i64;
    let avg_amount = total_amount / Decimal::from(total_expenses);

    let mut groups: HashMap<&str, (Decimal, i64)> = HashMap::new();
    for expense in expenses {
        let entry = groups
            .entry(expense.category.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut by_category: Vec<CategoryStats> = groups
        .into_iter()
        .map(|(category, (total_amount, count))| CategoryStats {
            category: category.to_string(),
            total_amount,
            count,
        })
        .collect();
    // Descending by total; category name breaks ties so output is deterministic
    by_category.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    ExpenseStats {
        overall: OverallStats {
            total_amount,
            total_expenses,
            avg_amount,
            max_amount,
            min_amount,
        },
        by_category,
    }
}
