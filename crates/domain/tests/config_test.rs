use ferrous_lookup_domain::config::{CliOverrides, Config, ConfigError};
use ferrous_lookup_domain::{Endpoint, RecordType};

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.resolver.host, "8.8.8.8");
    assert_eq!(config.resolver.port, 53);
    assert_eq!(config.resolver.record_type, "A");
    assert_eq!(config.resolver.timeout_ms, 3000);
    assert_eq!(config.resolver.transaction_id, 0xAAAA);
    assert_eq!(config.logging.level, "warn");
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml(
        r#"
        [resolver]
        host = "1.1.1.1"
        record_type = "txt"
        "#,
    )
    .unwrap();

    assert_eq!(config.resolver.host, "1.1.1.1");
    assert_eq!(config.resolver.port, 53);
    assert_eq!(config.record_type().unwrap(), RecordType::TXT);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.resolver.endpoint(), Endpoint::new("1.1.1.1", 53));
}

#[test]
fn test_empty_toml_is_default() {
    assert_eq!(Config::from_toml("").unwrap(), Config::default());
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let result = Config::from_toml("[resolver\nport = 53");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_cli_overrides_win() {
    let mut config = Config::default();
    config.apply_cli_overrides(CliOverrides {
        host: Some("9.9.9.9".to_string()),
        port: Some(5353),
        record_type: Some("MX".to_string()),
        timeout_ms: Some(250),
        transaction_id: Some(42),
        log_level: Some("debug".to_string()),
    });

    assert_eq!(config.resolver.host, "9.9.9.9");
    assert_eq!(config.resolver.port, 5353);
    assert_eq!(config.record_type().unwrap(), RecordType::MX);
    assert_eq!(config.resolver.timeout_ms, 250);
    assert_eq!(config.resolver.transaction_id, 42);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_empty_overrides_change_nothing() {
    let mut config = Config::default();
    config.apply_cli_overrides(CliOverrides::default());
    assert_eq!(config, Config::default());
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = Config::default();
    config.resolver.port = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    let mut config = Config::default();
    config.resolver.host = "  ".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    let mut config = Config::default();
    config.resolver.record_type = "BOGUS".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_load_missing_file_is_read_error() {
    let result = Config::load(
        Some("/nonexistent/ferrous-lookup.toml"),
        CliOverrides::default(),
    );
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}
