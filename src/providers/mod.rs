/*!
 * Provider implementations for the translation session.
 *
 * - Groq: hosted OpenAI-compatible chat-completion API
 * - Mock: scripted in-process provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

pub use self::groq::{ChatMessage, ChatRequest, ChatResponse, Groq, Role};

/// Common trait for chat-completion providers
///
/// The translation session only depends on this trait, so the network client
/// can be swapped for a mock in tests.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a chat request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<ChatResponse, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError>;
}

pub mod groq;
pub mod mock;
