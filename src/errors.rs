/*!
 * Error types for the mantra library.
 *
 * This module contains custom error types for the provider client, the
 * configuration layer and the translation session, using the thiserror
 * crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with the provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether a failed request is worth sending again
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

/// Errors raised while building a session from configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The provider credential is absent and validation was requested
    #[error("Missing API key: set GROQ_API_KEY or translation.provider.api_key before using the Groq translator")]
    MissingApiKey,

    /// The context window cannot hold a prompt and its continuation seed
    #[error("Invalid context size {0}: the conversation window needs at least 2 messages")]
    InvalidContextSize(usize),

    /// An empty stop sequence would be sent as `[""]`
    #[error("Invalid stop sequence: it must not be empty")]
    EmptyStopSequence,

    /// The provider endpoint is not a usable URL
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// Endpoint as configured
        endpoint: String,
        /// Parser message
        reason: String,
    },
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API, passed through untouched
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
