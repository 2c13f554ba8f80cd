use dash_core::{
    currency, filter_and_sort, storage::write_collection, DateRange, GoalService, GoalStatus,
    MemoryStore, Store, StoreSettings, SummaryService, TransactionService,
};
use dash_core::{FixedClock, StorageKey};
use dash_domain::{BudgetState, Currency, Goal, Theme, Transaction, TransactionKind, DAY_MS};

const NOW: i64 = 1_717_243_200_000;

#[test]
fn conversion_round_trips_for_every_currency() {
    for currency in Currency::ALL {
        for amount in [0.0, 0.01, 1.0, 4_170.0, 123_456.78, -2_500.5] {
            let back = currency::to_base(currency::to_display(amount, currency), currency);
            assert!(
                (back - amount).abs() < 1e-6,
                "{currency}: {amount} came back as {back}"
            );
        }
    }
}

#[test]
fn savings_is_income_minus_expenses_after_any_sequence() {
    let mut state = BudgetState::with_defaults(NOW, Currency::Pkr, Theme::Dark);
    let currencies = Currency::ALL;

    for step in 0..60_i64 {
        state.currency = currencies[(step % 4) as usize];
        let kind = if step % 3 == 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        let clock = FixedClock::from_millis(NOW + step);
        match step % 5 {
            0..=2 => {
                TransactionService::add_or_update(
                    &mut state,
                    kind,
                    None,
                    10.0 + step as f64,
                    "Step",
                    None,
                    &clock,
                )
                .expect("add");
            }
            3 => {
                if let Some(id) = state.list(kind).first().map(|t| t.id) {
                    TransactionService::add_or_update(
                        &mut state,
                        kind,
                        Some(id),
                        7.5,
                        "Edited",
                        Some("Food".into()),
                        &clock,
                    )
                    .expect("edit existing");
                }
            }
            _ => {
                let id = state.list(kind).last().map(|t| t.id).unwrap_or(-1);
                TransactionService::delete(&mut state, kind, id);
            }
        }

        let totals = SummaryService::totals(&state);
        let income: f64 = state.income.iter().map(|t| t.amount).sum();
        let expenses: f64 = state.expenses.iter().map(|t| t.amount).sum();
        assert!((totals.income - income).abs() < 1e-9);
        assert!((totals.expenses - expenses).abs() < 1e-9);
        assert!((totals.savings - (totals.income - totals.expenses)).abs() < 1e-9);
    }
}

#[test]
fn filter_output_is_sorted_subset_within_bounds() {
    let transactions: Vec<Transaction> = (0..200_i64)
        .map(|i| Transaction::new(i, 1.0, "T", NOW - (i * 7919 % 90) * DAY_MS / 3, None))
        .collect();
    let range = DateRange::parse("2024-04-15", "2024-05-10").expect("range");
    let (start, end) = range.bounds();

    let filtered = filter_and_sort(&transactions, &range);
    assert!(filtered
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    assert!(filtered
        .iter()
        .all(|t| t.timestamp >= start && t.timestamp < end));
    let expected = transactions
        .iter()
        .filter(|t| t.timestamp >= start && t.timestamp < end)
        .count();
    assert_eq!(filtered.len(), expected);

    let everything = filter_and_sort(&transactions, &DateRange::default());
    assert_eq!(everything.len(), transactions.len());
}

#[test]
fn goal_thresholds_are_strict() {
    let mut state = BudgetState::default();
    state.expense_goals = vec![
        Goal::new(1, "Food", 100.0),
        Goal::new(2, "Bills", 100.0),
        Goal::new(3, "Fun", 0.0),
    ];
    state.expenses = vec![
        Transaction::new(1, 90.0, "Market", NOW, Some("Food".into())),
        Transaction::new(2, 70.0, "Power", NOW, Some("Bills".into())),
        Transaction::new(3, 5.0, "food", NOW, Some("food".into())),
        Transaction::new(4, 50.0, "Cinema", NOW, Some("Fun".into())),
    ];

    let progress = GoalService::expense_progress(&state);
    assert_eq!(progress[0].status, GoalStatus::AtRisk);
    assert_eq!(progress[0].current, 90.0);
    assert_eq!(progress[1].status, GoalStatus::OnTrack);
    assert_eq!(progress[2].percentage, 0.0);
}

#[test]
fn store_substitutes_defaults_per_collection() {
    let mut backend = MemoryStore::new();
    let expenses = vec![Transaction::new(9, 42.0, "Only", NOW, None)];
    write_collection(&mut backend, StorageKey::EXPENSES, &expenses).expect("seed");
    dash_core::KeyValueStore::set(&mut backend, StorageKey::INCOME_GOALS, "[1,2")
        .expect("seed corrupt");

    let store = Store::load(Box::new(backend), StoreSettings::default(), NOW);
    let state = store.state();
    assert_eq!(state.expenses, expenses);
    assert_eq!(state.income.len(), 2);
    assert_eq!(state.income_goals.len(), 2);
    assert_eq!(state.expense_goals.len(), 5);
    assert!(state.recurring.is_empty());
}
