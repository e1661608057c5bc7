mod common;

use common::temp_file;
use waymark::config::{Config, ConfigError, OutputFormat};
use waymark::ResolutionPolicy;

/// Test that Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.defaults.policy, ResolutionPolicy::OverAll);
    assert_eq!(config.defaults.log_level, "warn");
    assert_eq!(config.defaults.max_steps, 10_000);
    assert_eq!(config.output.format, OutputFormat::Text);
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("waymark/config.toml"));
}

#[test]
fn test_validation_passes_for_default() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validation_fails_zero_max_steps() {
    let mut config = Config::default();
    config.defaults.max_steps = 0;

    match config.validate() {
        Err(ConfigError::ValidationError { message }) => assert!(message.contains("max_steps")),
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}

#[test]
fn test_validation_fails_blank_log_level() {
    let mut config = Config::default();
    config.defaults.log_level = "   ".to_string();

    assert!(matches!(config.validate(), Err(ConfigError::ValidationError { .. })));
}

#[test]
fn test_load_missing_file_returns_default() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("nonexistent.toml");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_full_file() {
    let (_dir, path) = temp_file(
        "config.toml",
        r#"
[defaults]
policy = "reject_if_active"
log_level = "waymark=debug"
max_steps = 50

[output]
format = "json"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.defaults.policy, ResolutionPolicy::RejectIfActive);
    assert_eq!(config.defaults.log_level, "waymark=debug");
    assert_eq!(config.defaults.max_steps, 50);
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn test_partial_file_fills_defaults() {
    let (_dir, path) = temp_file("config.toml", "[defaults]\npolicy = \"replace_current\"\n");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.defaults.policy, ResolutionPolicy::ReplaceCurrent);
    assert_eq!(config.defaults.log_level, "warn");
    assert_eq!(config.output.format, OutputFormat::Text);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = temp_file("config.toml", "[defaults\npolicy = ");

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_unknown_policy_is_parse_error() {
    let (_dir, path) = temp_file("config.toml", "[defaults]\npolicy = \"sometimes\"\n");

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_loaded_file_is_validated() {
    let (_dir, path) = temp_file("config.toml", "[defaults]\nmax_steps = 0\n");

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_config_round_trips_through_toml() {
    let mut config = Config::default();
    config.output.format = OutputFormat::Json;

    let text = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
