//! Built-in collections used on first launch and after a reset.

use crate::{Goal, Transaction, DAY_MS};

fn seeded(id: i64, amount: f64, description: &str, category: &str, at: i64) -> Transaction {
    Transaction::new(id, amount, description, at, Some(category.to_string()))
}

pub fn default_income(now_ms: i64) -> Vec<Transaction> {
    vec![
        seeded(1, 50_000.0, "Monthly Salary", "Salary", now_ms - 10 * DAY_MS),
        seeded(2, 5_000.0, "Freelance Project", "Freelance", now_ms - 5 * DAY_MS),
    ]
}

pub fn default_expenses(now_ms: i64) -> Vec<Transaction> {
    vec![
        seeded(1, 15_000.0, "Rent", "Housing", now_ms - 20 * DAY_MS),
        seeded(2, 4_500.0, "Groceries", "Food", now_ms - 18 * DAY_MS),
        seeded(3, 2_000.0, "Utilities", "Bills", now_ms - 15 * DAY_MS),
        seeded(4, 1_200.0, "Internet", "Bills", now_ms - 12 * DAY_MS),
        seeded(5, 1_500.0, "Transport", "Transport", now_ms - 8 * DAY_MS),
        seeded(6, 3_000.0, "Entertainment", "Entertainment", now_ms - 2 * DAY_MS),
    ]
}

pub fn default_expense_goals() -> Vec<Goal> {
    vec![
        Goal::new(1, "Food", 10_000.0),
        Goal::new(2, "Housing", 15_000.0),
        Goal::new(3, "Transport", 3_000.0),
        Goal::new(4, "Entertainment", 5_000.0),
        Goal::new(5, "Bills", 4_000.0),
    ]
}

pub fn default_income_goals() -> Vec<Goal> {
    vec![
        Goal::new(1, "Salary", 50_000.0),
        Goal::new(2, "Freelance", 7_500.0),
    ]
}
