//! Row rendering for transactions, goals, recurring rules and history.

use chrono::{DateTime, Utc};
use dash_core::{Dashboard, GoalProgress, MonthlySummary};
use dash_domain::{RecurringRule, Transaction};

const BAR_CELLS: usize = 20;
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn date_time(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp)
        .map(|at| at.format(DATE_TIME_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn date(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp)
        .map(|at| at.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn transaction_row(dashboard: &Dashboard, txn: &Transaction) -> String {
    format!(
        "{:>14}  {}  {:<24}  {:<14}  {:>16}",
        txn.id,
        date_time(txn.timestamp),
        txn.description,
        txn.category.as_deref().unwrap_or("-"),
        dashboard.format_amount(txn.amount),
    )
}

/// Text progress bar, e.g. `[#####...............]`.
pub fn progress_bar(percentage: f64) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_CELLS as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(BAR_CELLS.saturating_sub(filled))
    )
}

pub fn goal_row(dashboard: &Dashboard, progress: &GoalProgress) -> String {
    format!(
        "{:<14}  {:>16} / {:<16}  {:>6.1}%  {}  {}",
        progress.goal.category,
        dashboard.format_amount(progress.current),
        dashboard.format_amount(progress.goal.target),
        progress.percentage,
        progress_bar(progress.bar_width()),
        progress.status.label(),
    )
}

pub fn recurring_row(dashboard: &Dashboard, rule: &RecurringRule) -> String {
    format!(
        "{:>14}  {:<7}  {:<8}  next {}  {:<20}  {:>16}",
        rule.id,
        rule.kind.label(),
        rule.frequency.label(),
        date(rule.next_due_date),
        rule.description,
        dashboard.format_amount(rule.amount),
    )
}

pub fn history_row(dashboard: &Dashboard, month: &MonthlySummary) -> String {
    format!(
        "{:<16}  income {:>16}  expenses {:>16}  savings {:>16}",
        month.label(),
        dashboard.format_amount(month.total_income),
        dashboard.format_amount(month.total_expenses),
        dashboard.format_amount(month.savings),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_is_clamped() {
        assert_eq!(progress_bar(0.0), format!("[{}]", ".".repeat(20)));
        assert_eq!(progress_bar(50.0), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
        assert_eq!(progress_bar(250.0), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn timestamps_render_in_utc() {
        assert_eq!(date_time(1_717_243_200_000), "2024-06-01 12:00");
        assert_eq!(date(1_717_243_200_000), "2024-06-01");
    }
}
