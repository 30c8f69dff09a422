/*!
 * Mock provider implementation for testing.
 *
 * The mock answers chat requests from a queue of scripted replies and
 * records every request it receives, so tests can inspect exactly what the
 * session would have sent over the wire:
 * - `MockProvider::scripted(...)` - Replies in order, then a default reply
 * - `MockProvider::failing(...)` - Always fails with the given error kind
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::errors::ProviderError;
use crate::providers::{ChatRequest, ChatResponse, Provider};

/// Reply used once the script is exhausted
pub const DEFAULT_MOCK_REPLY: &str = "{'translated':'[TRANSLATED]'}";

/// Type of error to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockErrorType {
    /// Authentication error (invalid API key)
    #[default]
    Auth,
    /// Connection error
    Connection,
    /// Rate limit error
    RateLimit,
    /// API error
    Api,
    /// Response body did not match the expected shape
    Malformed,
}

impl MockErrorType {
    fn to_error(self) -> ProviderError {
        match self {
            Self::Auth => ProviderError::AuthenticationError("Invalid API key".to_string()),
            Self::Connection => ProviderError::ConnectionError("Connection refused".to_string()),
            Self::RateLimit => ProviderError::RateLimitExceeded("Too many requests".to_string()),
            Self::Api => ProviderError::ApiError { status_code: 500, message: "Internal error".to_string() },
            Self::Malformed => ProviderError::ParseError("missing field `usage`".to_string()),
        }
    }
}

/// One scripted provider answer
#[derive(Debug, Clone)]
enum MockReply {
    Content { content: String, total_tokens: u64 },
    Error(MockErrorType),
}

/// Mock provider for testing session behavior without network access
#[derive(Debug, Default)]
pub struct MockProvider {
    /// Replies handed out in order
    script: Mutex<VecDeque<MockReply>>,
    /// Every request received, in order
    requests: Mutex<Vec<ChatRequest>>,
    /// Error returned for every request when set
    always_fail: Option<MockErrorType>,
    /// Tokens reported for the default reply
    default_tokens: u64,
}

impl MockProvider {
    /// Create a mock provider with an empty script
    pub fn new() -> Self {
        Self { default_tokens: 10, ..Self::default() }
    }

    /// Create a mock that answers with the given contents and token totals, in order
    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mock = Self::new();
        for (content, total_tokens) in replies {
            mock.push_reply(content, total_tokens);
        }
        mock
    }

    /// Create a failing mock provider that always errors
    pub fn failing(error_type: MockErrorType) -> Self {
        Self { always_fail: Some(error_type), ..Self::new() }
    }

    /// Queue a successful reply
    pub fn push_reply(&self, content: impl Into<String>, total_tokens: u64) {
        self.script.lock().push_back(MockReply::Content { content: content.into(), total_tokens });
    }

    /// Queue a failure for the next unanswered request
    pub fn fail_next_call(&self, error_type: MockErrorType) {
        self.script.lock().push_back(MockReply::Error(error_type));
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Copy of all requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        self.requests.lock().push(request);

        if let Some(error_type) = self.always_fail {
            return Err(error_type.to_error());
        }

        let next = self.script.lock().pop_front();
        match next {
            Some(MockReply::Content { content, total_tokens }) => Ok(ChatResponse::from_content(content, total_tokens)),
            Some(MockReply::Error(error_type)) => Err(error_type.to_error()),
            None => Ok(ChatResponse::from_content(DEFAULT_MOCK_REPLY, self.default_tokens)),
        }
    }
}
