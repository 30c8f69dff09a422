use std::time::{Duration, Instant};

use crate::providers::groq::ChatUsage;

/// Token usage statistics for a session's lifetime
#[derive(Debug, Clone)]
pub struct TokenUsage {
    /// Total tokens across every completed call
    pub total_tokens: u64,

    /// Total tokens of the most recent completed call
    pub last_call_tokens: u64,

    /// Prompt tokens across every completed call
    pub prompt_tokens: u64,

    /// Completion tokens across every completed call
    pub completion_tokens: u64,

    /// Number of completed calls
    pub requests: u64,

    /// Start time of token tracking
    pub start_time: Instant,

    /// Total time spent waiting for the provider
    pub api_duration: Duration,
}

impl Default for TokenUsage {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenUsage {
    pub fn new() -> Self {
        Self {
            total_tokens: 0,
            last_call_tokens: 0,
            prompt_tokens: 0,
            completion_tokens: 0,
            requests: 0,
            start_time: Instant::now(),
            api_duration: Duration::ZERO,
        }
    }

    /// Account for one completed call
    pub fn record(&mut self, usage: &ChatUsage, elapsed: Duration) {
        self.total_tokens += usage.total_tokens;
        self.last_call_tokens = usage.total_tokens;
        self.prompt_tokens += usage.prompt_tokens;
        self.completion_tokens += usage.completion_tokens;
        self.requests += 1;
        self.api_duration += elapsed;
    }

    /// Calculate tokens per minute of API time
    pub fn tokens_per_minute(&self) -> f64 {
        let minutes = self.api_duration.as_secs_f64() / 60.0;
        if minutes > 0.0 {
            self.total_tokens as f64 / minutes
        } else {
            0.0
        }
    }

    /// Generate a summary of token usage
    pub fn summary(&self) -> String {
        format!(
            "Token Usage Summary:\n\
             Requests: {}\n\
             Prompt tokens: {}\n\
             Completion tokens: {}\n\
             Total tokens: {}\n\
             Last request: {}\n\
             Elapsed time: {:.2} minutes\n\
             API request time: {:.2} minutes\n\
             Tokens per minute: {:.2}",
            self.requests,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens,
            self.last_call_tokens,
            self.start_time.elapsed().as_secs_f64() / 60.0,
            self.api_duration.as_secs_f64() / 60.0,
            self.tokens_per_minute()
        )
    }
}
