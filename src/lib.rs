#![doc(test(attr(deny(warnings))))]

//! Budget Dash is a terminal front end for the income/expense dashboard:
//! it wires configuration, JSON persistence, and the dash-core engine into
//! a line-oriented command shell.

pub mod cli;
pub mod errors;
pub mod utils;

use std::{path::Path, sync::Once};

use dash_config::{Config, ConfigManager};
use dash_core::{Dashboard, StoreSettings, SystemClock};
use dash_storage_json::JsonFileStore;

pub use errors::{CliError, DashError};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Dash tracing initialized.");
    });
}

/// Maps the persisted preferences onto the store's fallback settings.
pub fn store_settings(config: &Config) -> StoreSettings {
    StoreSettings {
        default_currency: config.default_currency,
        default_theme: config.default_theme,
        status_ttl_ms: config.status_ttl_ms,
    }
}

/// Loads the config under `home` and opens the dashboard on its data directory.
pub fn open_dashboard(home: &Path) -> Result<(Dashboard, Config), DashError> {
    let manager = ConfigManager::for_home(home)?;
    let config = manager.load()?;
    let store = JsonFileStore::new(config.resolve_data_dir(home))?;
    let dashboard = Dashboard::open(
        Box::new(store),
        store_settings(&config),
        Box::new(SystemClock),
    );
    Ok((dashboard, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_does_not_panic() {
        super::init();
    }

    #[test]
    fn open_dashboard_uses_configured_defaults() {
        let home = tempfile::tempdir().unwrap();
        let manager = ConfigManager::for_home(home.path()).unwrap();
        let config = Config {
            default_currency: dash_domain::Currency::Gbp,
            ..Config::default()
        };
        manager.save(&config).unwrap();

        let (dashboard, loaded) = open_dashboard(home.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(dashboard.currency(), dash_domain::Currency::Gbp);
        assert!(home.path().join("data").is_dir());
    }
}
