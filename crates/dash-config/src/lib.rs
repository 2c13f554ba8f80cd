//! dash-config
//!
//! User preferences for the dashboard shell: fallback currency and theme,
//! status message lifetime, and data/export locations.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
