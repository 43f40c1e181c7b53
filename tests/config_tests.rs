use dco_creator::components::zones::{ZoneConfig, ZoneDefinition};
use dco_creator::config::Config;
use dco_creator::error::Error;
use dco_creator::startup::{load_config, ConfigSource};
use std::fs;

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config").join("dco.toml");

    let mut config = Config::default();
    config.day_start_hour = 8;
    config
        .zones
        .add(ZoneDefinition::new("Stockroom", "#445566".parse().unwrap()).unwrap())
        .unwrap();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.zones.len(), 8);
    assert_eq!(loaded.zones.by_hotkey(8).unwrap().name, "Stockroom");
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (config, source) = load_config(dir.path().join("absent.toml"));
    assert_eq!(config, Config::default());
    assert!(matches!(source, ConfigSource::Loaded(_)));
}

#[test]
fn test_invalid_zone_list_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dco.toml");
    fs::write(
        &path,
        r##"
[[zones]]
name = ""
color = "#FF0000"
"##,
    )
    .unwrap();

    assert!(matches!(Config::load(&path), Err(Error::Serialization(_))));

    let (config, source) = load_config(&path);
    assert_eq!(config.zones, ZoneConfig::default());
    assert!(matches!(source, ConfigSource::Fallback(_)));
}

#[test]
fn test_out_of_order_hours_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dco.toml");
    fs::write(&path, "day_start_hour = 20\nday_end_hour = 10\n").unwrap();

    assert!(matches!(Config::load(&path), Err(Error::Config(_))));
    let (config, _) = load_config(&path);
    assert_eq!(config.slot_window(), Config::default().slot_window());
}
