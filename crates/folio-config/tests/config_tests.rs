use folio_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_sensible_fields() {
    let cfg = Config::default();

    assert_eq!(cfg.currency, "USD");
    assert_eq!(cfg.currency_precision, 2);
    assert_eq!(cfg.page_size, 10);
    assert!(!cfg.strict_periods);
    assert!(cfg.validate().is_ok());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().join("home")).expect("manager");
    assert!(!manager.config_path().exists());
    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.currency = "EUR".to_string();
    cfg.utc_offset_minutes = Some(120);
    cfg.strict_periods = true;
    cfg.palette.insert("income".into(), "#00FF00".into());

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    let offset = loaded.fixed_offset().expect("valid").expect("configured");
    assert_eq!(offset.local_minus_utc(), 7200);
}

#[test]
fn partial_files_fall_back_to_field_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "currency": "EUR" }"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load");
    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.page_size, 10);
    assert!(loaded.ui_color_enabled);
    assert!(loaded.utc_offset_minutes.is_none());
}

#[test]
fn files_without_currency_still_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");

    std::fs::write(&path, "{}").expect("write");
    assert_eq!(ConfigManager::new(path.clone()).load().expect("load"), Config::default());

    std::fs::write(&path, r#"{ "utc_offset_minutes": 0 }"#).expect("write");
    let loaded = ConfigManager::new(path.clone()).load().expect("load");
    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.utc_offset_minutes, Some(0));

    std::fs::write(&path, r#"{ "locale": "pt-PT", "ui_color_enabled": false }"#)
        .expect("write");
    let loaded = ConfigManager::new(path).load().expect("load");
    assert!(!loaded.ui_color_enabled);
    assert_eq!(loaded.currency_precision, 2);
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.page_size = 0;
    assert!(matches!(manager.save(&cfg), Err(ConfigError::Invalid(_))));

    cfg.page_size = 5;
    cfg.utc_offset_minutes = Some(20 * 60);
    assert!(matches!(cfg.fixed_offset(), Err(ConfigError::Invalid(_))));
}
