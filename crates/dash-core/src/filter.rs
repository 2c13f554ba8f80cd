//! Date-range filtering for transaction lists.

use std::cmp::Reverse;

use chrono::NaiveDate;
use dash_domain::{Transaction, DAY_MS};

use crate::CoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar-day range. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Parses `YYYY-MM-DD` bounds; empty strings leave the bound open.
    pub fn parse(start: &str, end: &str) -> Result<Self, CoreError> {
        Ok(Self {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Half-open `[start, end)` window in epoch milliseconds. The end bound is
    /// extended by one day so the whole end date is included.
    pub fn bounds(&self) -> (i64, i64) {
        let start = self.start.map(day_start_millis).unwrap_or(i64::MIN);
        let end = self
            .end
            .map(|date| day_start_millis(date).saturating_add(DAY_MS))
            .unwrap_or(i64::MAX);
        (start, end)
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let (start, end) = self.bounds();
        timestamp >= start && timestamp < end
    }

    pub fn label(&self) -> String {
        let fmt = |date: Option<NaiveDate>| {
            date.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "…".to_string())
        };
        if self.is_unbounded() {
            "all dates".to_string()
        } else {
            format!("{} to {}", fmt(self.start), fmt(self.end))
        }
    }
}

/// Returns the transactions inside `range`, most recent first.
pub fn filter_and_sort(transactions: &[Transaction], range: &DateRange) -> Vec<Transaction> {
    let mut filtered: Vec<Transaction> = transactions
        .iter()
        .filter(|txn| range.contains(txn.timestamp))
        .cloned()
        .collect();
    filtered.sort_by_key(|txn| Reverse(txn.timestamp));
    filtered
}

fn parse_bound(raw: &str) -> Result<Option<NaiveDate>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|err| CoreError::Validation(format!("invalid date `{trimmed}`: {err}")))
}

fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc().timestamp_millis())
        .unwrap_or(i64::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn txn(id: i64, timestamp: i64) -> Transaction {
        Transaction::new(id, 10.0, format!("txn {id}"), timestamp, None)
    }

    #[test]
    fn single_day_range_covers_whole_day() {
        let range = DateRange::parse("2024-06-01", "2024-06-01").unwrap();
        assert!(range.contains(at(2024, 6, 1, 0)));
        assert!(range.contains(at(2024, 6, 1, 23)));
        assert!(!range.contains(at(2024, 6, 2, 0)));
        assert!(!range.contains(at(2024, 5, 31, 23)));
    }

    #[test]
    fn empty_bounds_keep_everything_sorted_descending() {
        let items = vec![txn(1, 100), txn(2, 300), txn(3, 200)];
        let out = filter_and_sort(&items, &DateRange::default());
        let ids: Vec<i64> = out.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn open_start_is_unbounded_below() {
        let range = DateRange::parse("", "2024-01-01").unwrap();
        assert!(range.contains(i64::MIN + 1));
        assert!(!range.contains(at(2024, 1, 2, 0)));
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let items: Vec<Transaction> = (0..20)
            .map(|i| txn(i, at(2024, 6, 1 + (i as u32 % 10), (i as u32 * 5) % 24)))
            .collect();
        let range = DateRange::parse("2024-06-03", "2024-06-06").unwrap();
        let once = filter_and_sort(&items, &range);
        let twice = filter_and_sort(&once, &range);
        assert_eq!(once, twice);
        assert!(once.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn rejects_malformed_dates() {
        let err = DateRange::parse("06/01/2024", "").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
