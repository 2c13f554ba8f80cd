//! Facade tying the store, the applied date filter, and the clock together.
//!
//! Every read accessor recomputes from the current state; nothing is cached.
//! Mutations change memory only. Nothing reaches the backend until
//! [`Dashboard::save`], except currency and theme which persist on change.

use dash_domain::{BudgetState, Currency, Goal, RecurringRule, Theme, Transaction, TransactionKind};
use tracing::debug;

use crate::{
    currency,
    export_service::ExportService,
    filter::{filter_and_sort, DateRange},
    goal_service::{GoalProgress, GoalService},
    recurring_service::RecurringService,
    storage::KeyValueStore,
    store::{StatusMessage, Store, StoreSettings},
    summary_service::{Distribution, MonthlySummary, SummaryService, Totals},
    time::Clock,
    transaction_service::TransactionService,
    CoreError,
};

pub struct Dashboard {
    store: Store,
    range: DateRange,
    clock: Box<dyn Clock>,
}

impl Dashboard {
    /// Loads state from `backend`, falling back to defaults per collection.
    pub fn open(
        backend: Box<dyn KeyValueStore>,
        settings: StoreSettings,
        clock: Box<dyn Clock>,
    ) -> Self {
        let store = Store::load(backend, settings, clock.now_millis());
        Self::from_store(store, clock)
    }

    pub fn from_store(store: Store, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            range: DateRange::default(),
            clock,
        }
    }

    pub fn state(&self) -> &BudgetState {
        self.store.state()
    }

    pub fn currency(&self) -> Currency {
        self.store.state().currency
    }

    pub fn theme(&self) -> Theme {
        self.store.state().theme
    }

    pub fn date_range(&self) -> &DateRange {
        &self.range
    }

    pub fn totals(&self) -> Totals {
        SummaryService::totals(self.state())
    }

    pub fn expense_goals(&self) -> Vec<GoalProgress> {
        GoalService::expense_progress(self.state())
    }

    pub fn income_goals(&self) -> Vec<GoalProgress> {
        GoalService::income_progress(self.state())
    }

    /// The `kind` list restricted to the applied range, newest first.
    pub fn filtered(&self, kind: TransactionKind) -> Vec<Transaction> {
        filter_and_sort(self.state().list(kind), &self.range)
    }

    /// Formats a base-unit amount in the current display currency.
    pub fn format_amount(&self, base_amount: f64) -> String {
        currency::format_currency(base_amount, self.currency())
    }

    /// Converts a base-unit amount to the current display currency.
    pub fn display_amount(&self, base_amount: f64) -> f64 {
        currency::to_display(base_amount, self.currency())
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.store.status(self.clock.now_millis())
    }

    pub fn history(&self) -> Vec<MonthlySummary> {
        SummaryService::monthly_history(self.state())
    }

    pub fn distribution(&self) -> Option<Distribution> {
        SummaryService::distribution(&self.totals())
    }

    pub fn category_options(&self, kind: TransactionKind) -> Vec<String> {
        GoalService::category_options(self.state(), kind)
    }

    /// Adds a transaction, or edits `existing_id` when given. `amount_display`
    /// is in the current display currency.
    pub fn submit_transaction(
        &mut self,
        kind: TransactionKind,
        existing_id: Option<i64>,
        amount_display: f64,
        description: &str,
        category: Option<String>,
    ) -> Result<i64, CoreError> {
        TransactionService::add_or_update(
            self.store.state_mut(),
            kind,
            existing_id,
            amount_display,
            description,
            category,
            self.clock.as_ref(),
        )
    }

    pub fn delete_transaction(&mut self, kind: TransactionKind, id: i64) -> bool {
        TransactionService::delete(self.store.state_mut(), kind, id)
    }

    pub fn save_goals(&mut self, expense_goals: Vec<Goal>, income_goals: Vec<Goal>) {
        GoalService::save_goals(self.store.state_mut(), expense_goals, income_goals);
    }

    pub fn set_expense_goals(&mut self, goals: Vec<Goal>) {
        GoalService::set_expense_goals(self.store.state_mut(), goals);
    }

    pub fn set_income_goals(&mut self, goals: Vec<Goal>) {
        GoalService::set_income_goals(self.store.state_mut(), goals);
    }

    pub fn save_recurring(&mut self, rules: Vec<RecurringRule>) {
        RecurringService::save_rules(self.store.state_mut(), rules);
    }

    pub fn apply_recurring(&mut self) -> usize {
        RecurringService::materialize_due(self.store.state_mut(), self.clock.as_ref())
    }

    pub fn save(&mut self) -> Result<(), CoreError> {
        let now = self.clock.now_millis();
        self.store.save(now)
    }

    /// Restores the built-in defaults. The applied filter is kept.
    pub fn reset(&mut self) -> Result<(), CoreError> {
        let now = self.clock.now_millis();
        self.store.reset(now)
    }

    pub fn apply_filter(&mut self, range: DateRange) {
        debug!(range = %range.label(), "date filter applied");
        self.range = range;
    }

    pub fn clear_filter(&mut self) {
        self.range = DateRange::default();
    }

    pub fn set_currency(&mut self, currency: Currency) -> Result<(), CoreError> {
        let now = self.clock.now_millis();
        self.store.set_currency(currency, now)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, CoreError> {
        let now = self.clock.now_millis();
        self.store.toggle_theme(now)
    }

    /// CSV text for the filtered `kind` list in the display currency.
    pub fn export_csv(&self, kind: TransactionKind) -> Result<String, CoreError> {
        let rows = self.filtered(kind);
        ExportService::to_csv(&rows, &self.state().income, self.currency())
    }
}
