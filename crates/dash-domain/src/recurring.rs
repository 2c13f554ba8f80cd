//! Recurring transaction rules.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::common::*;
use crate::transaction::TransactionKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl Frequency {
    /// Returns the epoch-millisecond timestamp one period after `timestamp`.
    /// Monthly steps keep the time of day and clamp the day to the month length.
    pub fn advance(self, timestamp: i64) -> i64 {
        match self {
            Frequency::Daily => timestamp + Duration::days(1).num_milliseconds(),
            Frequency::Weekly => timestamp + Duration::weeks(1).num_milliseconds(),
            Frequency::Monthly => match DateTime::<Utc>::from_timestamp_millis(timestamp) {
                Some(current) => {
                    let naive = current.naive_utc();
                    let shifted = shift_month(naive.date(), 1).and_time(naive.time());
                    shifted.and_utc().timestamp_millis()
                }
                None => timestamp + Duration::days(30).num_milliseconds(),
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(UnknownVariant {
                kind: "frequency",
                value: value.to_string(),
            }),
        }
    }
}

/// Template that produces a transaction each time it falls due.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringRule {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(serialize_with = "serialize_finite")]
    pub amount: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub frequency: Frequency,
    pub start_date: i64,
    pub next_due_date: i64,
}

impl RecurringRule {
    pub fn new(
        id: i64,
        kind: TransactionKind,
        amount: f64,
        description: impl Into<String>,
        frequency: Frequency,
        start_date: i64,
    ) -> Self {
        Self {
            id,
            kind,
            amount,
            description: description.into(),
            category: None,
            frequency,
            start_date,
            next_due_date: start_date,
        }
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        self.next_due_date <= now_ms
    }
}
