//! Recurring rule maintenance and materialization of due occurrences.

use dash_domain::{BudgetState, RecurringRule, Transaction};
use tracing::{debug, info};

use crate::{currency, time::Clock};

/// Upper bound on occurrences generated per rule in one pass.
const MAX_CATCH_UP: usize = 366;

pub struct RecurringService;

impl RecurringService {
    /// Replaces all rules with `rules`, whose amounts are in the display currency.
    /// Rules with a blank description or a non-positive amount are dropped.
    pub fn save_rules(state: &mut BudgetState, rules: Vec<RecurringRule>) {
        let currency = state.currency;
        state.recurring = rules
            .into_iter()
            .filter(|rule| !rule.description.trim().is_empty() && rule.amount > 0.0)
            .map(|rule| RecurringRule {
                amount: currency::to_base(rule.amount, currency),
                ..rule
            })
            .collect();
        debug!(count = state.recurring.len(), "recurring rules replaced");
    }

    /// Appends one transaction per elapsed occurrence of every due rule and
    /// advances each rule past `now`. Returns the number of transactions created.
    pub fn materialize_due(state: &mut BudgetState, clock: &dyn Clock) -> usize {
        let now = clock.now_millis();
        let mut next_id = now;
        let mut generated = Vec::new();

        for rule in state.recurring.iter_mut() {
            let mut steps = 0;
            while rule.is_due(now) && steps < MAX_CATCH_UP {
                generated.push((
                    rule.kind,
                    Transaction::new(
                        next_id,
                        rule.amount,
                        rule.description.clone(),
                        rule.next_due_date,
                        rule.category.clone(),
                    ),
                ));
                next_id += 1;
                rule.next_due_date = rule.frequency.advance(rule.next_due_date);
                steps += 1;
            }
        }

        let count = generated.len();
        for (kind, txn) in generated {
            state.list_mut(kind).push(txn);
        }
        if count > 0 {
            info!(count, "recurring transactions generated");
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::NaiveDate;
    use dash_domain::{Currency, Frequency, TransactionKind};

    fn at(y: i32, m: u32, d: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    #[test]
    fn save_rules_filters_invalid_entries() {
        let mut state = BudgetState {
            currency: Currency::Eur,
            ..BudgetState::default()
        };
        let valid = RecurringRule::new(1, TransactionKind::Expense, 2.0, "Gym", Frequency::Monthly, 0);
        let blank = RecurringRule::new(2, TransactionKind::Expense, 2.0, "  ", Frequency::Monthly, 0);
        let zero = RecurringRule::new(3, TransactionKind::Income, 0.0, "Zero", Frequency::Daily, 0);
        RecurringService::save_rules(&mut state, vec![valid, blank, zero]);
        assert_eq!(state.recurring.len(), 1);
        assert!((state.recurring[0].amount - 600.0).abs() < 1e-6);
    }

    #[test]
    fn weekly_rule_catches_up_missed_weeks() {
        let mut state = BudgetState::default();
        state.recurring.push(RecurringRule::new(
            1,
            TransactionKind::Expense,
            500.0,
            "Cleaner",
            Frequency::Weekly,
            at(2024, 6, 1),
        ));
        let clock = FixedClock::from_millis(at(2024, 6, 16));
        let created = RecurringService::materialize_due(&mut state, &clock);

        assert_eq!(created, 3);
        let stamps: Vec<i64> = state.expenses.iter().map(|t| t.timestamp).collect();
        assert_eq!(stamps, vec![at(2024, 6, 1), at(2024, 6, 8), at(2024, 6, 15)]);
        assert_eq!(state.recurring[0].next_due_date, at(2024, 6, 22));
        let ids: Vec<i64> = state.expenses.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn future_rules_are_left_alone() {
        let mut state = BudgetState::default();
        state.recurring.push(RecurringRule::new(
            1,
            TransactionKind::Income,
            100.0,
            "Allowance",
            Frequency::Monthly,
            at(2025, 1, 1),
        ));
        let clock = FixedClock::from_millis(at(2024, 12, 31));
        assert_eq!(RecurringService::materialize_due(&mut state, &clock), 0);
        assert!(state.income.is_empty());
    }
}
