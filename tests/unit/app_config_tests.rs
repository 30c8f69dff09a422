/*!
 * Tests for application configuration functionality
 */

use std::collections::HashMap;

use mantra::app_config::{Config, LogLevel, SessionConfig};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_default_config_should_have_expected_values() {
    let config = Config::default();

    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.translation.provider.endpoint, "https://api.groq.com/openai/v1");
    assert_eq!(config.translation.provider.timeout_secs, 40);
    assert_eq!(config.translation.provider.retry_count, 5);
    assert_eq!(config.translation.provider.rate_limit, Some(200));
    assert_eq!(config.translation.session.max_tokens, 8192);
    assert_eq!(config.translation.session.max_context, 20);
    assert!(!config.translation.session.context_retention);
    assert!(config.translation.settings.is_none());
}

#[test]
fn test_apply_env_overrides_should_set_fields() {
    let mut config = Config::default();

    config
        .apply_env_overrides(env(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("GROQ_MODEL", "mixtral"),
            ("CONTEXT_RETENTION", "TRUE"),
            ("CONTEXT_LENGTH", "12"),
        ]))
        .unwrap();

    assert_eq!(config.translation.provider.api_key, "gsk_test");
    assert_eq!(config.translation.provider.model, "mixtral");
    assert!(config.translation.session.context_retention);
    assert_eq!(config.translation.session.max_context, 12);
}

#[test]
fn test_apply_env_overrides_with_non_true_retention_should_disable() {
    let mut config = Config::default();
    config.translation.session.context_retention = true;

    config.apply_env_overrides(env(&[("CONTEXT_RETENTION", "yes")])).unwrap();

    assert!(!config.translation.session.context_retention);
}

#[test]
fn test_apply_env_overrides_with_bad_length_should_fail() {
    let mut config = Config::default();
    assert!(config.apply_env_overrides(env(&[("CONTEXT_LENGTH", "lots")])).is_err());
}

#[test]
fn test_apply_env_overrides_with_nothing_set_should_change_nothing() {
    let mut config = Config::default();
    config.apply_env_overrides(env(&[])).unwrap();
    assert_eq!(config.translation.session, SessionConfig::default());
    assert!(config.translation.provider.api_key.is_empty());
}

#[test]
fn test_validate_with_missing_key_should_fail_only_when_required() {
    let config = Config::default();
    assert!(config.validate(true).is_err());
    assert!(config.validate(false).is_ok());
}

#[test]
fn test_validate_with_tiny_window_should_fail() {
    let mut config = Config::default();
    config.translation.session.max_context = 1;
    assert!(config.validate(false).is_err());
}

#[test]
fn test_config_json_with_partial_fields_should_fill_defaults() {
    let json = r#"{
        "log_level": "debug",
        "translation": {
            "provider": { "api_key": "gsk_file" },
            "session": { "context_retention": true },
            "settings": { "groq.temperature": 0.4, "top_p": 0.8 }
        }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.translation.provider.api_key, "gsk_file");
    assert_eq!(config.translation.provider.timeout_secs, 40);
    assert!(config.translation.session.context_retention);
    assert_eq!(config.translation.session.max_context, 20);
    let settings = config.translation.settings.unwrap();
    assert_eq!(settings.resolve("groq", "temperature", 0.3_f32), 0.4);
}
