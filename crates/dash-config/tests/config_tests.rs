use dash_config::{Config, ConfigError, ConfigManager};
use dash_domain::{Currency, Theme};
use tempfile::tempdir;

#[test]
fn default_config_matches_dashboard_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.default_currency, Currency::Pkr);
    assert_eq!(cfg.default_theme, Theme::Dark);
    assert_eq!(cfg.status_ttl_ms, 3_000);
    assert!(cfg.data_dir.is_none());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::for_home(dir.path()).expect("manager");

    assert!(manager.path().ends_with("config/config.json"));
    assert_eq!(manager.load().expect("load config"), Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::for_home(dir.path()).expect("manager");

    let cfg = Config {
        default_currency: Currency::Eur,
        default_theme: Theme::Light,
        status_ttl_ms: 5_000,
        export_dir: Some(dir.path().join("exports")),
        ..Config::default()
    };

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config/config.json.tmp").exists());
}

#[test]
fn malformed_file_reports_position() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::for_home(dir.path()).expect("manager");
    std::fs::write(manager.path(), "{ not json").expect("write");

    let err = manager.load().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { line: 1, .. }));
    assert!(err.to_string().contains("config.json"));
}

#[test]
fn update_applies_change_and_persists() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::for_home(dir.path()).expect("manager");

    let updated = manager
        .update(|cfg| cfg.set("default-currency", "gbp"))
        .expect("update");
    assert_eq!(updated.default_currency, Currency::Gbp);
    assert_eq!(manager.load().expect("reload").default_currency, Currency::Gbp);
}

#[test]
fn failed_update_leaves_file_untouched() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::for_home(dir.path()).expect("manager");
    manager.save(&Config::default()).expect("save");
    let before = std::fs::read_to_string(manager.path()).expect("read");

    let err = manager
        .update(|cfg| cfg.set("status-ttl-ms", "soon"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "status-ttl-ms", .. }));
    assert_eq!(std::fs::read_to_string(manager.path()).expect("read"), before);
}
