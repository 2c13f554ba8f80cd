use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const STAGING_EXTENSION: &str = "json.tmp";

/// Reads and writes the single `config.json` under an application home.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `<home>/config/config.json`, creating `<home>/config` if needed.
    pub fn for_home(home: &Path) -> Result<Self, ConfigError> {
        let dir = home.join(CONFIG_DIR);
        fs::create_dir_all(&dir).map_err(|source| ConfigError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            path: dir.join(CONFIG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file yields the defaults; a malformed one is an error that
    /// points at the offending line.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => return Err(self.io_error(source)),
        };
        serde_json::from_str(&raw).map_err(|err| ConfigError::Parse {
            path: self.path.clone(),
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        })
    }

    /// Writes a staging file next to the config and renames it into place.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let mut json = serde_json::to_string_pretty(config)?;
        json.push('\n');
        let staging = self.path.with_extension(STAGING_EXTENSION);
        fs::write(&staging, json)
            .and_then(|()| fs::rename(&staging, &self.path))
            .map_err(|source| self.io_error(source))
    }

    /// Loads the current file, applies `change`, and saves the result.
    /// Nothing is written when `change` fails.
    pub fn update<F>(&self, change: F) -> Result<Config, ConfigError>
    where
        F: FnOnce(&mut Config) -> Result<(), ConfigError>,
    {
        let mut config = self.load()?;
        change(&mut config)?;
        self.save(&config)?;
        Ok(config)
    }

    fn io_error(&self, source: io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
