//! CSV export of filtered transaction lists.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use dash_domain::{Currency, Transaction, TransactionKind};
use tracing::info;

use crate::{currency, CoreError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

pub struct ExportService;

impl ExportService {
    /// Renders `transactions` as CSV text in the display `currency`.
    ///
    /// A row is labelled `Income` when its id appears in `income`, otherwise
    /// `Expense`. The description column is always quoted with inner quotes
    /// doubled. An empty input is rejected with [`CoreError::EmptyExport`].
    pub fn to_csv(
        transactions: &[Transaction],
        income: &[Transaction],
        currency: Currency,
    ) -> Result<String, CoreError> {
        if transactions.is_empty() {
            return Err(CoreError::EmptyExport);
        }
        let income_ids: HashSet<i64> = income.iter().map(|txn| txn.id).collect();

        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        let amount_header = format!("Amount ({})", currency.code());
        writer.write_record([
            "Type",
            "Date",
            "Time",
            "Description",
            "Category",
            amount_header.as_str(),
        ])?;

        for txn in transactions {
            let kind = if income_ids.contains(&txn.id) {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            let (date, time) = date_and_time(txn.timestamp);
            writer.write_record([
                kind.label().to_string(),
                date,
                time,
                quote(&txn.description),
                txn.category.clone().unwrap_or_default(),
                currency::plain_amount(currency::to_display(txn.amount, currency)),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| CoreError::Export(err.to_string()))?;
        let mut text = String::from_utf8(bytes).map_err(|err| CoreError::Export(err.to_string()))?;
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }

    pub fn default_file_name(kind: TransactionKind) -> &'static str {
        match kind {
            TransactionKind::Income => "income_transactions.csv",
            TransactionKind::Expense => "expense_transactions.csv",
        }
    }

    /// Writes rendered CSV to `dir/<default file name>` and returns the path.
    pub fn write(dir: &Path, kind: TransactionKind, csv: &str) -> Result<PathBuf, CoreError> {
        let path = dir.join(Self::default_file_name(kind));
        Self::write_to(&path, csv)?;
        Ok(path)
    }

    pub fn write_to(path: &Path, csv: &str) -> Result<(), CoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, csv)?;
        info!(path = %path.display(), "transactions exported");
        Ok(())
    }
}

fn quote(description: &str) -> String {
    format!("\"{}\"", description.replace('"', "\"\""))
}

fn date_and_time(timestamp: i64) -> (String, String) {
    match DateTime::<Utc>::from_timestamp_millis(timestamp) {
        Some(at) => (
            at.format(DATE_FORMAT).to_string(),
            at.format(TIME_FORMAT).to_string(),
        ),
        None => (String::new(), String::new()),
    }
}
