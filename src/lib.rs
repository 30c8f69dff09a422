/*!
 * # mantra - MANga TRAnslation over hosted chat models
 *
 * A Rust library for translating manga panel text line by line through a
 * hosted chat-completion API (Groq, OpenAI-compatible).
 *
 * ## Features
 *
 * - Rolling conversation window for cross-panel narrative context
 * - Few-shot prompting with a primed JSON continuation and stop sequence
 * - Best-effort cleanup of constrained model replies
 * - Prompt overrides through a namespaced settings map
 * - Client-side rate limiting, retries and timeouts
 * - Token usage accounting
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management and settings lookup
 * - `translation`: The contextual translation session and its parts
 * - `providers`: Groq client and a mock provider for tests
 * - `language_utils`: Translator and ISO language code resolution
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, SessionConfig, Settings, TranslationConfig};
pub use errors::{ConfigError, ProviderError, TranslationError};
pub use language_utils::resolve_language_name;
pub use translation::{SharedSession, TranslationSession};
