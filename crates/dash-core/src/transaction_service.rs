//! The only code path that adds, edits, or removes transactions.
//!
//! Input is expected to be validated by the caller (positive amount, non-empty
//! description). Only the converted base amount is checked here.

use dash_domain::{BudgetState, Transaction, TransactionKind};
use tracing::debug;

use crate::{currency, time::Clock, CoreError};

pub struct TransactionService;

impl TransactionService {
    /// Appends a new transaction or edits `existing_id` in place, converting the
    /// display amount to the base unit. Edits keep the id and original timestamp.
    /// New ids are the clock's epoch milliseconds, so two entries created within
    /// the same millisecond share an id.
    pub fn add_or_update(
        state: &mut BudgetState,
        kind: TransactionKind,
        existing_id: Option<i64>,
        amount_display: f64,
        description: &str,
        category: Option<String>,
        clock: &dyn Clock,
    ) -> Result<i64, CoreError> {
        let amount = currency::to_base_checked(amount_display, state.currency)?;
        match existing_id {
            Some(id) => {
                let txn = state
                    .transaction_mut(kind, id)
                    .ok_or(CoreError::TransactionNotFound(id))?;
                txn.amount = amount;
                txn.description = description.to_string();
                txn.category = category;
                debug!(%kind, id, amount, "transaction updated");
                Ok(id)
            }
            None => {
                let now = clock.now_millis();
                state
                    .list_mut(kind)
                    .push(Transaction::new(now, amount, description, now, category));
                debug!(%kind, id = now, amount, "transaction added");
                Ok(now)
            }
        }
    }

    /// Removes the transaction with `id` from the `kind` list. Returns whether
    /// anything was removed.
    pub fn delete(state: &mut BudgetState, kind: TransactionKind, id: i64) -> bool {
        let list = state.list_mut(kind);
        let before = list.len();
        list.retain(|txn| txn.id != id);
        let removed = list.len() != before;
        debug!(%kind, id, removed, "transaction delete requested");
        removed
    }
}
