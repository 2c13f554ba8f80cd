pub mod build_info;

use dirs::home_dir;
use std::{env, io, path::PathBuf, sync::Once};

const DEFAULT_DIR_NAME: &str = ".budget_dash";
pub const HOME_ENV: &str = "BUDGET_DASH_HOME";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. Logs go to stderr so script
/// output on stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{
            filter::{Directive, LevelFilter},
            fmt, EnvFilter,
        };

        let directive: Directive = "budget_dash=info"
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into());
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
            .add_directive(directive);

        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    });
}

/// Returns the application directory, defaulting to `~/.budget_dash`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
