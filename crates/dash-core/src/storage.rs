//! Persistence bridge: an opaque text key-value capability plus typed helpers.

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::CoreError;

/// Fixed keys the dashboard persists under.
pub struct StorageKey;

impl StorageKey {
    pub const INCOME: &'static str = "budget-income";
    pub const EXPENSES: &'static str = "budget-expenses";
    pub const EXPENSE_GOALS: &'static str = "budget-goals";
    pub const INCOME_GOALS: &'static str = "budget-income-goals";
    pub const RECURRING: &'static str = "budget-recurring";
    pub const CURRENCY: &'static str = "budget-currency";
    pub const THEME: &'static str = "theme";

    /// Keys cleared by a reset. Preferences (currency, theme) survive.
    pub const DATA: [&'static str; 5] = [
        Self::INCOME,
        Self::EXPENSES,
        Self::EXPENSE_GOALS,
        Self::INCOME_GOALS,
        Self::RECURRING,
    ];
}

/// Abstraction over text key-value backends (in-memory, JSON files, ...).
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

/// Why a persisted collection could not be used.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("no value stored under `{0}`")]
    Missing(String),
    #[error("value under `{key}` is malformed: {reason}")]
    Malformed { key: String, reason: String },
    #[error("backend failed reading `{key}`: {reason}")]
    Backend { key: String, reason: String },
}

/// Reads and deserializes the value under `key`.
pub fn read_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<T, ReadError> {
    let raw = store
        .get(key)
        .map_err(|err| ReadError::Backend {
            key: key.to_string(),
            reason: err.to_string(),
        })?
        .ok_or_else(|| ReadError::Missing(key.to_string()))?;
    serde_json::from_str(&raw).map_err(|err| ReadError::Malformed {
        key: key.to_string(),
        reason: err.to_string(),
    })
}

/// JSON text for `value`. Fails on amounts JSON cannot represent (NaN, infinity).
pub fn encode_collection<T: Serialize + ?Sized>(value: &T) -> Result<String, CoreError> {
    Ok(serde_json::to_string(value)?)
}

/// Serializes `value` as JSON and stores it under `key`. Nothing is written
/// when encoding fails.
pub fn write_collection<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), CoreError> {
    let json = encode_collection(value)?;
    store.set(key, &json)
}

/// Process-local store. Contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
