use dash_domain::{Currency, Theme};
use serde::{de::Deserializer, Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ConfigError;

const DATA_DIR_NAME: &str = "data";
const UNSET: &str = "(default)";

/// Stores user-configurable dashboard preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Used until a currency has been chosen and persisted.
    #[serde(default, deserialize_with = "lenient")]
    pub default_currency: Currency,
    #[serde(default, deserialize_with = "lenient")]
    pub default_theme: Theme,
    #[serde(default = "Config::default_status_ttl_ms")]
    pub status_ttl_ms: u64,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional directory for persisted dashboard data. Defaults to `<home>/data`.
    pub data_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional directory for CSV exports. Defaults to the working directory.
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: Currency::default(),
            default_theme: Theme::default(),
            status_ttl_ms: Self::default_status_ttl_ms(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
            export_dir: None,
        }
    }
}

impl Config {
    pub fn default_status_ttl_ms() -> u64 {
        3_000
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Keys accepted by [`Config::set`], in display order.
    pub const KEYS: [&'static str; 6] = [
        "default-currency",
        "default-theme",
        "status-ttl-ms",
        "color",
        "data-dir",
        "export-dir",
    ];

    /// `(key, value)` pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let path = |value: &Option<PathBuf>| {
            value
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| UNSET.to_string())
        };
        vec![
            (Self::KEYS[0], self.default_currency.code().to_string()),
            (Self::KEYS[1], self.default_theme.to_string()),
            (Self::KEYS[2], self.status_ttl_ms.to_string()),
            (Self::KEYS[3], self.ui_color_enabled.to_string()),
            (Self::KEYS[4], path(&self.data_dir)),
            (Self::KEYS[5], path(&self.export_dir)),
        ]
    }

    /// Updates one field from its text form. `-` clears the optional directories.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "default-currency" => self.default_currency = parse(Self::KEYS[0], value)?,
            "default-theme" => self.default_theme = parse(Self::KEYS[1], value)?,
            "status-ttl-ms" => self.status_ttl_ms = parse(Self::KEYS[2], value)?,
            "color" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    _ => return Err(invalid(Self::KEYS[3], value)),
                }
            }
            "data-dir" => self.data_dir = optional_path(value),
            "export-dir" => self.export_dir = optional_path(value),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn resolve_data_dir(&self, home: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => home.join(DATA_DIR_NAME),
        }
    }

    pub fn resolve_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    match value {
        "" | "-" => None,
        path => Some(PathBuf::from(path)),
    }
}

/// Accepts any string and falls back to the default for unknown or missing values.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + Default,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let cfg: Config =
            serde_json::from_str(r#"{"default_theme":"sepia","default_currency":"usd"}"#).unwrap();
        assert_eq!(cfg.default_theme, Theme::Dark);
        assert_eq!(cfg.default_currency, Currency::Usd);
        assert_eq!(cfg.status_ttl_ms, 3_000);
    }

    #[test]
    fn set_parses_each_key() {
        let mut cfg = Config::default();
        cfg.set("default-currency", "eur").unwrap();
        cfg.set("default-theme", "light").unwrap();
        cfg.set("status-ttl-ms", "1500").unwrap();
        cfg.set("color", "off").unwrap();
        cfg.set("export-dir", "/tmp/out").unwrap();
        assert_eq!(cfg.default_currency, Currency::Eur);
        assert_eq!(cfg.default_theme, Theme::Light);
        assert_eq!(cfg.status_ttl_ms, 1_500);
        assert!(!cfg.ui_color_enabled);
        assert_eq!(cfg.export_dir, Some(PathBuf::from("/tmp/out")));

        cfg.set("export-dir", "-").unwrap();
        assert_eq!(cfg.export_dir, None);
    }

    #[test]
    fn set_rejects_bad_input_without_changes() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("default-currency", "BTC"),
            Err(ConfigError::InvalidValue { key: "default-currency", .. })
        ));
        assert!(matches!(
            cfg.set("locale", "fr-FR"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn entries_cover_every_key() {
        let keys: Vec<&str> = Config::default().entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, Config::KEYS);
    }

    #[test]
    fn data_dir_defaults_under_home() {
        let cfg = Config::default();
        assert_eq!(
            cfg.resolve_data_dir(Path::new("/tmp/dash")),
            PathBuf::from("/tmp/dash/data")
        );
    }
}
