//! Goal progress and wholesale goal replacement.

use std::fmt;

use dash_domain::{BudgetState, Currency, Goal, TransactionKind};
use tracing::debug;

use crate::currency;

pub const UNCATEGORIZED: &str = "Uncategorized";

const EXCEEDED_ABOVE: f64 = 90.0;
const AT_RISK_ABOVE: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    OnTrack,
    AtRisk,
    Exceeded,
}

impl GoalStatus {
    /// Both thresholds are strict: exactly 90% is still `AtRisk`, exactly 70% is `OnTrack`.
    pub fn classify(percentage: f64) -> Self {
        if percentage > EXCEEDED_ABOVE {
            GoalStatus::Exceeded
        } else if percentage > AT_RISK_ABOVE {
            GoalStatus::AtRisk
        } else {
            GoalStatus::OnTrack
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GoalStatus::OnTrack => "On Track",
            GoalStatus::AtRisk => "At Risk",
            GoalStatus::Exceeded => "Exceeded",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub goal: Goal,
    /// Spending for expense goals, earnings for income goals. Base unit.
    pub current: f64,
    pub percentage: f64,
    pub status: GoalStatus,
}

impl GoalProgress {
    /// Percentage clamped for progress-bar rendering.
    pub fn bar_width(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }
}

pub struct GoalService;

impl GoalService {
    pub fn expense_progress(state: &BudgetState) -> Vec<GoalProgress> {
        Self::progress(state, TransactionKind::Expense)
    }

    pub fn income_progress(state: &BudgetState) -> Vec<GoalProgress> {
        Self::progress(state, TransactionKind::Income)
    }

    /// Goals of `kind` matched against the transaction list of the same kind.
    pub fn progress(state: &BudgetState, kind: TransactionKind) -> Vec<GoalProgress> {
        let transactions = state.list(kind);
        state
            .goals(kind)
            .iter()
            .map(|goal| {
                let current: f64 = transactions
                    .iter()
                    .filter(|txn| txn.in_category(&goal.category))
                    .map(|txn| txn.amount)
                    .sum();
                let percentage = if goal.target > 0.0 {
                    current / goal.target * 100.0
                } else {
                    0.0
                };
                GoalProgress {
                    goal: goal.clone(),
                    current,
                    percentage,
                    status: GoalStatus::classify(percentage),
                }
            })
            .collect()
    }

    /// Category choices offered when entering a transaction of `kind`.
    pub fn category_options(state: &BudgetState, kind: TransactionKind) -> Vec<String> {
        state
            .goals(kind)
            .iter()
            .map(|goal| goal.category.clone())
            .chain(std::iter::once(UNCATEGORIZED.to_string()))
            .collect()
    }

    /// Replaces the expense goals with `goals`, whose targets are in the display currency.
    pub fn set_expense_goals(state: &mut BudgetState, goals: Vec<Goal>) {
        state.expense_goals = normalize(goals, state.currency);
        debug!(count = state.expense_goals.len(), "expense goals replaced");
    }

    /// Replaces the income goals with `goals`, whose targets are in the display currency.
    pub fn set_income_goals(state: &mut BudgetState, goals: Vec<Goal>) {
        state.income_goals = normalize(goals, state.currency);
        debug!(count = state.income_goals.len(), "income goals replaced");
    }

    /// Replaces both goal sets in one step.
    pub fn save_goals(state: &mut BudgetState, expense_goals: Vec<Goal>, income_goals: Vec<Goal>) {
        Self::set_expense_goals(state, expense_goals);
        Self::set_income_goals(state, income_goals);
    }
}

fn normalize(goals: Vec<Goal>, currency: Currency) -> Vec<Goal> {
    goals
        .into_iter()
        .filter(Goal::has_category)
        .map(|goal| Goal {
            target: currency::to_base(goal.target, currency),
            ..goal
        })
        .collect()
}
