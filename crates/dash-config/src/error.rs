use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures reading, writing or editing `config.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{} is not valid config (line {line}, column {column}): {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("cannot encode config: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("unknown config key `{0}`")]
    UnknownKey(String),

    #[error("`{value}` is not a valid value for `{key}`")]
    InvalidValue { key: &'static str, value: String },
}
