//! Line-oriented command shell over the dashboard engine.

pub mod commands;
pub mod core;
pub mod formatters;
pub mod help;
pub mod output;
pub mod registry;
pub mod shell;
pub mod shell_context;

pub use shell::run_cli;
