//! Loads, saves, and resets the dashboard state against a [`KeyValueStore`].

use dash_domain::{defaults, BudgetState, Currency, Theme};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    storage::{encode_collection, read_collection, KeyValueStore, ReadError, StorageKey},
    CoreError,
};

pub const DEFAULT_STATUS_TTL_MS: u64 = 3_000;

const SAVE_OK: &str = "Data saved successfully!";
const SAVE_FAILED: &str = "Error saving data.";
const RESET_OK: &str = "All data cleared successfully!";
const RESET_FAILED: &str = "Error clearing data.";
const PREFERENCE_FAILED: &str = "Error saving preferences.";

/// Fallbacks and timings the store needs from application configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    pub default_currency: Currency,
    pub default_theme: Theme,
    pub status_ttl_ms: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            default_currency: Currency::default(),
            default_theme: Theme::default(),
            status_ttl_ms: DEFAULT_STATUS_TTL_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
}

/// Short-lived feedback for save/reset style actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub expires_at_ms: i64,
}

impl StatusMessage {
    pub fn is_active(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_ms
    }
}

pub struct Store {
    state: BudgetState,
    backend: Box<dyn KeyValueStore>,
    settings: StoreSettings,
    status: Option<StatusMessage>,
}

impl Store {
    /// Reads every collection from `backend`. Never fails: a missing or
    /// unreadable collection is replaced by its built-in default.
    pub fn load(backend: Box<dyn KeyValueStore>, settings: StoreSettings, now_ms: i64) -> Self {
        let backend_ref = backend.as_ref();
        let state = BudgetState {
            income: load_or(backend_ref, StorageKey::INCOME, || {
                defaults::default_income(now_ms)
            }),
            expenses: load_or(backend_ref, StorageKey::EXPENSES, || {
                defaults::default_expenses(now_ms)
            }),
            expense_goals: load_or(
                backend_ref,
                StorageKey::EXPENSE_GOALS,
                defaults::default_expense_goals,
            ),
            income_goals: load_or(
                backend_ref,
                StorageKey::INCOME_GOALS,
                defaults::default_income_goals,
            ),
            recurring: load_or(backend_ref, StorageKey::RECURRING, Vec::new),
            currency: load_preference(backend_ref, StorageKey::CURRENCY)
                .unwrap_or(settings.default_currency),
            theme: load_preference(backend_ref, StorageKey::THEME)
                .unwrap_or(settings.default_theme),
        };
        info!(
            income = state.income.len(),
            expenses = state.expenses.len(),
            currency = %state.currency,
            "dashboard state loaded"
        );
        Self {
            state,
            backend,
            settings,
            status: None,
        }
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BudgetState {
        &mut self.state
    }

    /// Writes all collections. In-memory state is kept whether or not the write succeeds.
    pub fn save(&mut self, now_ms: i64) -> Result<(), CoreError> {
        match self.write_all() {
            Ok(()) => {
                info!("dashboard data saved");
                self.set_status(SAVE_OK, StatusLevel::Success, now_ms);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to save dashboard data");
                self.set_status(SAVE_FAILED, StatusLevel::Error, now_ms);
                Err(err)
            }
        }
    }

    /// Removes the persisted collections and restores the built-in defaults.
    /// Currency and theme preferences are kept.
    pub fn reset(&mut self, now_ms: i64) -> Result<(), CoreError> {
        let removed: Result<(), CoreError> = StorageKey::DATA
            .iter()
            .try_for_each(|key| self.backend.remove(key));
        match removed {
            Ok(()) => {
                self.state = BudgetState::with_defaults(now_ms, self.state.currency, self.state.theme);
                info!("dashboard data reset to defaults");
                self.set_status(RESET_OK, StatusLevel::Success, now_ms);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to clear dashboard data");
                self.set_status(RESET_FAILED, StatusLevel::Error, now_ms);
                Err(err)
            }
        }
    }

    /// Switches the display currency and persists the choice immediately.
    pub fn set_currency(&mut self, currency: Currency, now_ms: i64) -> Result<(), CoreError> {
        self.state.currency = currency;
        self.persist_preference(StorageKey::CURRENCY, currency.code(), now_ms)
    }

    /// Flips the theme and persists the choice immediately.
    pub fn toggle_theme(&mut self, now_ms: i64) -> Result<Theme, CoreError> {
        self.state.theme = self.state.theme.toggled();
        let theme = self.state.theme;
        self.persist_preference(StorageKey::THEME, theme.as_str(), now_ms)?;
        Ok(theme)
    }

    /// The latest status message, if it has not expired yet.
    pub fn status(&self, now_ms: i64) -> Option<&StatusMessage> {
        self.status.as_ref().filter(|status| status.is_active(now_ms))
    }

    /// Encodes every collection before touching the backend, so a value that
    /// cannot be stored leaves the previous save intact.
    fn write_all(&mut self) -> Result<(), CoreError> {
        let encoded = [
            (StorageKey::INCOME, encode_collection(&self.state.income)?),
            (StorageKey::EXPENSES, encode_collection(&self.state.expenses)?),
            (StorageKey::EXPENSE_GOALS, encode_collection(&self.state.expense_goals)?),
            (StorageKey::INCOME_GOALS, encode_collection(&self.state.income_goals)?),
            (StorageKey::RECURRING, encode_collection(&self.state.recurring)?),
        ];
        encoded
            .iter()
            .try_for_each(|(key, json)| self.backend.set(key, json))
    }

    fn persist_preference(&mut self, key: &str, value: &str, now_ms: i64) -> Result<(), CoreError> {
        self.backend.set(key, value).map_err(|err| {
            warn!(key, error = %err, "failed to persist preference");
            self.status = Some(StatusMessage {
                text: PREFERENCE_FAILED.to_string(),
                level: StatusLevel::Error,
                expires_at_ms: expiry(now_ms, self.settings.status_ttl_ms),
            });
            err
        })
    }

    fn set_status(&mut self, text: &str, level: StatusLevel, now_ms: i64) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            level,
            expires_at_ms: expiry(now_ms, self.settings.status_ttl_ms),
        });
    }
}

fn expiry(now_ms: i64, ttl_ms: u64) -> i64 {
    now_ms.saturating_add(i64::try_from(ttl_ms).unwrap_or(i64::MAX))
}

fn load_or<T, F>(backend: &dyn KeyValueStore, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match read_collection(backend, key) {
        Ok(value) => value,
        Err(ReadError::Missing(_)) => {
            debug!(key, "no persisted value, using defaults");
            fallback()
        }
        Err(err) => {
            warn!(key, error = %err, "failed to read persisted value, using defaults");
            fallback()
        }
    }
}

fn load_preference<T: std::str::FromStr>(backend: &dyn KeyValueStore, key: &str) -> Option<T> {
    match backend.get(key) {
        Ok(Some(raw)) => {
            let parsed = raw.parse().ok();
            if parsed.is_none() {
                warn!(key, value = %raw, "ignoring unrecognised preference");
            }
            parsed
        }
        Ok(None) => None,
        Err(err) => {
            warn!(key, error = %err, "failed to read preference");
            None
        }
    }
}
