//! Category targets used for progress display.

use serde::{Deserialize, Serialize};

use crate::common::*;

/// A per-category target. `category` joins against `Transaction::category`
/// and is not required to be unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: i64,
    pub category: String,
    #[serde(serialize_with = "serialize_finite")]
    pub target: f64,
}

/// Spending target matched against the expense list.
pub type BudgetGoal = Goal;

/// Earnings target matched against the income list.
pub type IncomeGoal = Goal;

impl Goal {
    pub fn new(id: i64, category: impl Into<String>, target: f64) -> Self {
        Self {
            id,
            category: category.into(),
            target,
        }
    }

    pub fn has_category(&self) -> bool {
        !self.category.trim().is_empty()
    }
}
