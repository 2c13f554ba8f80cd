use dash_config::ConfigError;
use dash_core::CoreError;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Failures surfaced by the library entry points.
#[derive(Debug, Error)]
pub enum DashError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

/// Failures that end the shell loop.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Dash(#[from] DashError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Dialog error: {0}")]
    Dialog(#[from] dialoguer::Error),
}
