//! Domain models for income and expense records.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::common::*;

/// A single income or expense record. `amount` is always kept in the base unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    #[serde(serialize_with = "serialize_finite")]
    pub amount: f64,
    pub description: String,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    pub fn new(
        id: i64,
        amount: f64,
        description: impl Into<String>,
        timestamp: i64,
        category: Option<String>,
    ) -> Self {
        Self {
            id,
            amount,
            description: description.into(),
            timestamp,
            category,
        }
    }

    /// Exact, case-sensitive category comparison used for goal progress.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Selects which of the two parallel transaction lists an operation targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" | "expenses" => Ok(TransactionKind::Expense),
            _ => Err(UnknownVariant {
                kind: "transaction kind",
                value: value.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_is_omitted_when_absent() {
        let txn = Transaction::new(7, 10.0, "Coffee", 1_700_000_000_000, None);
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("category"));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn infinite_amount_refuses_to_serialize() {
        let txn = Transaction::new(1, f64::INFINITY, "Overflow", 0, None);
        assert!(serde_json::to_string(&txn).is_err());
        let nan = Transaction::new(2, f64::NAN, "Nan", 0, None);
        assert!(serde_json::to_string(&nan).is_err());
    }

    #[test]
    fn category_match_is_case_sensitive() {
        let txn = Transaction::new(1, 5.0, "Lunch", 0, Some("Food".into()));
        assert!(txn.in_category("Food"));
        assert!(!txn.in_category("food"));
    }

    #[test]
    fn kind_parses_plural_expense() {
        assert_eq!("Expenses".parse(), Ok(TransactionKind::Expense));
        assert_eq!("income".parse(), Ok(TransactionKind::Income));
    }
}
