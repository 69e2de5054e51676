mod common;

use common::temp_base;
use finance_core::config::{Config, ConfigManager};
use finance_core::currency::{CurrencyDisplay, NegativeStyle};

#[test]
fn missing_config_loads_defaults() {
    let manager = ConfigManager::with_base_dir(temp_base()).expect("manager");
    let config = manager.load().expect("load");
    assert_eq!(config, Config::default());
    assert_eq!(config.formatter().format_amount(1234.0), "¥1,234");
}

#[test]
fn saved_config_drives_formatting() {
    let base = temp_base();
    let manager = ConfigManager::with_base_dir(base.clone()).expect("manager");
    let config = Config {
        locale: "en-US".into(),
        currency: "USD".into(),
        negative_style: NegativeStyle::Parentheses,
        ..Config::default()
    };
    manager.save(&config).expect("save");

    let reloaded = ConfigManager::with_base_dir(base).expect("manager").load().expect("load");
    assert_eq!(reloaded, config);
    assert_eq!(reloaded.formatter().format_amount(-20.0), "$ (20.00)");
}

#[test]
fn currency_display_setting_is_persisted() {
    let base = temp_base();
    let manager = ConfigManager::with_base_dir(base.clone()).expect("manager");
    let config = Config {
        locale: "en-GB".into(),
        currency: "GBP".into(),
        currency_display: CurrencyDisplay::Code,
        ..Config::default()
    };
    manager.save(&config).expect("save");

    let raw = std::fs::read_to_string(manager.path()).expect("read config");
    assert!(raw.contains("\"currency_display\": \"code\""), "{raw}");

    let reloaded = ConfigManager::with_base_dir(base).expect("manager").load().expect("load");
    assert_eq!(reloaded.formatter().format_amount(12.5), "GBP 12.50");
}

#[test]
fn store_dir_honours_override() {
    let base = temp_base();
    let config = Config::default();
    assert_eq!(config.store_dir(&base), base.join("store"));

    let custom = base.join("elsewhere");
    let config = Config {
        data_dir: Some(custom.clone()),
        ..Config::default()
    };
    assert_eq!(config.store_dir(&base), custom);
}

#[test]
fn malformed_config_is_reported() {
    let manager = ConfigManager::with_base_dir(temp_base()).expect("manager");
    std::fs::write(manager.path(), "locale = en").expect("seed config");
    let err = manager.load().expect_err("invalid json");
    assert!(err.to_string().contains("Configuration error"), "{err}");
}
