use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(i64),
    #[error("No transactions to export in the selected date range.")]
    EmptyExport,
    #[error("Export failed: {0}")]
    Export(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        CoreError::Export(err.to_string())
    }
}
