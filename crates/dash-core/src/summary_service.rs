//! Totals and aggregate views, recomputed from the live lists on every call.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use dash_domain::{Amounted, BudgetState, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

/// Income, expenses and savings for one calendar month (UTC).
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_income: f64,
    pub total_expenses: f64,
    pub savings: f64,
}

impl MonthlySummary {
    pub fn label(&self) -> String {
        format!("{}, {}", month_name(self.month), self.year)
    }
}

/// Percent shares of expenses and positive savings in the overview chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    pub expenses_pct: f64,
    pub savings_pct: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn totals(state: &BudgetState) -> Totals {
        let income = sum(&state.income);
        let expenses = sum(&state.expenses);
        Totals {
            income,
            expenses,
            savings: income - expenses,
        }
    }

    /// Groups both lists by month, newest month first.
    pub fn monthly_history(state: &BudgetState) -> Vec<MonthlySummary> {
        let mut months: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();
        for txn in &state.income {
            if let Some(key) = month_key(txn.timestamp) {
                months.entry(key).or_default().0 += txn.amount;
            }
        }
        for txn in &state.expenses {
            if let Some(key) = month_key(txn.timestamp) {
                months.entry(key).or_default().1 += txn.amount;
            }
        }
        months
            .into_iter()
            .rev()
            .map(|((year, month), (income, expenses))| MonthlySummary {
                year,
                month,
                total_income: income,
                total_expenses: expenses,
                savings: income - expenses,
            })
            .collect()
    }

    /// Returns `None` when there is nothing to chart.
    pub fn distribution(totals: &Totals) -> Option<Distribution> {
        let savings = totals.savings.max(0.0);
        let whole = totals.expenses + savings;
        if whole <= 0.0 {
            return None;
        }
        Some(Distribution {
            expenses_pct: totals.expenses / whole * 100.0,
            savings_pct: savings / whole * 100.0,
        })
    }
}

fn sum(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Amounted::amount).sum()
}

fn month_key(timestamp: i64) -> Option<(i32, u32)> {
    DateTime::<Utc>::from_timestamp_millis(timestamp).map(|at| (at.year(), at.month()))
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}
