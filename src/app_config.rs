use anyhow::{anyhow, Result};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and environment overrides.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TranslationConfig {
    /// Connection settings for the Groq API
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Conversation window and request budget
    #[serde(default)]
    pub session: SessionConfig,

    /// Optional prompt overrides keyed by `"<namespace>.<key>"` or `"<key>"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

/// Provider connection configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Retries after the first attempt
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    // @field: Backoff base in milliseconds, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    // @field: Rate limit (requests per minute)
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<u32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            rate_limit: default_rate_limit(),
        }
    }
}

/// Settings of a single translation session
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionConfig {
    /// Token budget; half of it is the per-request output cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Keep real assistant replies in the window for later requests
    #[serde(default)]
    pub context_retention: bool,

    /// Maximum number of messages kept in the conversation window
    #[serde(default = "default_max_context")]
    pub max_context: usize,

    /// Namespace used for the first tier of settings lookups
    #[serde(default = "default_config_key")]
    pub config_key: String,

    /// JSON-escape source text before embedding it in the prompt envelope
    #[serde(default)]
    pub escape_source_text: bool,

    /// Stop sequence closing the primed JSON value
    #[serde(default = "default_stop_sequence")]
    pub stop_sequence: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            context_retention: false,
            max_context: default_max_context(),
            config_key: default_config_key(),
            escape_source_text: false,
            stop_sequence: default_stop_sequence(),
        }
    }
}

impl SessionConfig {
    /// Output-token cap sent with each request
    pub fn max_output_tokens(&self) -> u32 {
        self.max_tokens / 2
    }

    /// Check the window can hold a prompt and its continuation seed, and
    /// that the primed reply has a stop sequence to end on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_context < 2 {
            return Err(ConfigError::InvalidContextSize(self.max_context));
        }
        if self.stop_sequence.is_empty() {
            return Err(ConfigError::EmptyStopSequence);
        }
        Ok(())
    }
}

/// Free-form settings with a two-level key lookup
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Settings(HashMap<String, serde_json::Value>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw value, returning self for chaining
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Resolve `"<namespace>.<key>"`, then `"<key>"`, then `default`
    ///
    /// A value of the wrong type is skipped with a warning and the next tier
    /// is consulted.
    pub fn resolve<T: DeserializeOwned>(&self, namespace: &str, key: &str, default: T) -> T {
        let namespaced = format!("{}.{}", namespace, key);
        for candidate in [namespaced.as_str(), key] {
            if let Some(value) = self.0.get(candidate) {
                match serde_json::from_value::<T>(value.clone()) {
                    Ok(resolved) => return resolved,
                    Err(e) => warn!("Ignoring setting '{}': {}", candidate, e),
                }
            }
        }
        default
    }
}

/// Resolve against optional settings; without settings the default applies
pub fn resolve_setting<T: DeserializeOwned>(settings: Option<&Settings>, namespace: &str, key: &str, default: T) -> T {
    match settings {
        Some(settings) => settings.resolve(namespace, key, default),
        None => default,
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    40
}

fn default_retry_count() -> u32 {
    5
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_rate_limit() -> Option<u32> {
    Some(200)
}

fn default_max_tokens() -> u32 {
    8192
}

fn default_max_context() -> usize {
    20
}

fn default_config_key() -> String {
    "groq".to_string()
}

fn default_stop_sequence() -> String {
    "'}".to_string()
}

impl Config {
    /// Apply process environment overrides
    pub fn apply_process_env(&mut self) -> Result<()> {
        self.apply_env_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an environment-like lookup
    ///
    /// Recognised variables: `GROQ_API_KEY`, `GROQ_MODEL`, `CONTEXT_RETENTION`
    /// (`"true"`, any case, enables retention) and `CONTEXT_LENGTH`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.translation.provider.api_key = api_key;
        }

        if let Some(model) = lookup("GROQ_MODEL").filter(|m| !m.trim().is_empty()) {
            self.translation.provider.model = model;
        }

        if let Some(retention) = lookup("CONTEXT_RETENTION") {
            self.translation.session.context_retention = retention.trim().eq_ignore_ascii_case("true");
        }

        if let Some(length) = lookup("CONTEXT_LENGTH") {
            self.translation.session.max_context = length
                .trim()
                .parse()
                .map_err(|_| anyhow!("CONTEXT_LENGTH must be a positive integer, got '{}'", length))?;
        }

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self, require_api_key: bool) -> Result<()> {
        self.translation.session.validate()?;

        url::Url::parse(&self.translation.provider.endpoint)
            .map_err(|e| anyhow!("Invalid provider endpoint '{}': {}", self.translation.provider.endpoint, e))?;

        if self.translation.provider.model.trim().is_empty() {
            return Err(anyhow!("A model name is required (set GROQ_MODEL or translation.provider.model)"));
        }

        if require_api_key && self.translation.provider.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey.into());
        }

        Ok(())
    }
}
