//! The explicit context object every dashboard operation reads from or mutates.

use serde::{Deserialize, Serialize};

use crate::{defaults, Currency, Goal, RecurringRule, Theme, Transaction, TransactionKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BudgetState {
    pub income: Vec<Transaction>,
    pub expenses: Vec<Transaction>,
    pub expense_goals: Vec<Goal>,
    pub income_goals: Vec<Goal>,
    #[serde(default)]
    pub recurring: Vec<RecurringRule>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub theme: Theme,
}

impl BudgetState {
    /// Builds the seeded state shown on first launch, with timestamps relative to `now_ms`.
    pub fn with_defaults(now_ms: i64, currency: Currency, theme: Theme) -> Self {
        Self {
            income: defaults::default_income(now_ms),
            expenses: defaults::default_expenses(now_ms),
            expense_goals: defaults::default_expense_goals(),
            income_goals: defaults::default_income_goals(),
            recurring: Vec::new(),
            currency,
            theme,
        }
    }

    pub fn list(&self, kind: TransactionKind) -> &[Transaction] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expenses,
        }
    }

    pub fn list_mut(&mut self, kind: TransactionKind) -> &mut Vec<Transaction> {
        match kind {
            TransactionKind::Income => &mut self.income,
            TransactionKind::Expense => &mut self.expenses,
        }
    }

    /// Goals matched against the list of the same kind.
    pub fn goals(&self, kind: TransactionKind) -> &[Goal] {
        match kind {
            TransactionKind::Income => &self.income_goals,
            TransactionKind::Expense => &self.expense_goals,
        }
    }

    pub fn transaction(&self, kind: TransactionKind, id: i64) -> Option<&Transaction> {
        self.list(kind).iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, kind: TransactionKind, id: i64) -> Option<&mut Transaction> {
        self.list_mut(kind).iter_mut().find(|txn| txn.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_are_selected_by_kind() {
        let state = BudgetState::with_defaults(1_000_000_000_000, Currency::Pkr, Theme::Dark);
        assert_eq!(state.list(TransactionKind::Income).len(), 2);
        assert_eq!(state.list(TransactionKind::Expense).len(), 6);
        assert_eq!(state.goals(TransactionKind::Expense).len(), 5);
        assert_eq!(state.goals(TransactionKind::Income).len(), 2);
    }

    #[test]
    fn ids_are_scoped_per_list() {
        let state = BudgetState::with_defaults(1_000_000_000_000, Currency::Pkr, Theme::Dark);
        let income = state.transaction(TransactionKind::Income, 1).unwrap();
        let expense = state.transaction(TransactionKind::Expense, 1).unwrap();
        assert_eq!(income.description, "Monthly Salary");
        assert_eq!(expense.description, "Rent");
    }
}
