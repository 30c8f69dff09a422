/*!
 * Configuration file to session construction, without network access
 */

use std::fs::File;
use std::io::BufReader;

use mantra::app_config::Config;
use mantra::errors::ConfigError;
use mantra::TranslationSession;

use crate::common::{create_temp_dir, create_test_file};

fn load(path: &std::path::Path) -> Config {
    serde_json::from_reader(BufReader::new(File::open(path).unwrap())).unwrap()
}

#[test]
fn test_session_from_config_without_key_should_fail_before_any_request() {
    let config = Config::default();

    let result = TranslationSession::from_config(&config.translation, true);

    assert!(matches!(result, Err(ConfigError::MissingApiKey)));
}

#[test]
fn test_session_from_config_without_key_check_should_build() {
    let config = Config::default();

    let session = TranslationSession::from_config(&config.translation, false).unwrap();

    assert_eq!(session.model(), config.translation.provider.model);
    assert_eq!(session.usage().total_tokens, 0);
}

#[test]
fn test_session_from_config_file_should_apply_every_section() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        &dir,
        "conf.json",
        r#"{
            "translation": {
                "provider": { "api_key": "gsk_file", "model": "llama-3.1-8b-instant" },
                "session": { "context_retention": true, "max_context": 8 },
                "settings": { "groq.chat_system_template": "Only {to_lang}.", "temperature": 0.6 }
            }
        }"#,
    )
    .unwrap();

    let config = load(&path);
    config.validate(true).unwrap();
    let session = TranslationSession::from_config(&config.translation, true).unwrap();

    assert_eq!(session.model(), "llama-3.1-8b-instant");
    assert!(session.options().context_retention);
    assert_eq!(session.options().max_context, 8);
    assert_eq!(session.prompts().system_prompt("Korean"), "Only Korean.");
    assert_eq!(session.prompts().temperature, 0.6);
    assert_eq!(session.prompts().top_p, 0.92);
}

#[test]
fn test_session_from_config_with_bad_endpoint_should_fail() {
    let mut config = Config::default();
    config.translation.provider.api_key = "gsk_test".to_string();
    config.translation.provider.endpoint = "::nope::".to_string();

    let result = TranslationSession::from_config(&config.translation, true);

    assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
}

#[test]
fn test_default_config_should_round_trip_through_file() {
    let dir = create_temp_dir().unwrap();
    let json = serde_json::to_string_pretty(&Config::default()).unwrap();
    let path = create_test_file(&dir, "conf.json", &json).unwrap();

    let config = load(&path);

    assert_eq!(config.translation.session, Config::default().translation.session);
}
