/*!
 * Contextual translation session.
 *
 * One session translates panel text one line per request, carrying a
 * rolling window of earlier exchanges so the model sees the narrative.
 * Each request is primed with an assistant continuation seed and stopped at
 * the matching closing fragment; the reply is then cleaned into a plain
 * string.
 *
 * `translate` takes `&mut self`: a session serves one caller at a time.
 * Share it behind [`SharedSession`] when several tasks need it.
 */

use log::{debug, info, trace, warn};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::app_config::{SessionConfig, Settings, TranslationConfig};
use crate::errors::{ConfigError, TranslationError};
use crate::providers::{ChatMessage, ChatRequest, Groq, Provider};
use crate::translation::cleanup::clean_reply;
use crate::translation::prompts::{user_prompt, PromptConfig, CONTINUATION_SEED};
use crate::translation::usage::TokenUsage;
use crate::translation::window::ConversationWindow;

/// Session shared between tasks; the mutex serializes whole `translate` calls
pub type SharedSession<P> = Arc<Mutex<TranslationSession<P>>>;

/// Stateful few-shot chat translator
#[derive(Debug)]
pub struct TranslationSession<P: Provider> {
    /// Chat-completion client
    provider: P,

    /// Model identifier sent with every request
    model: String,

    /// Prompt and sampling values resolved at construction
    prompts: PromptConfig,

    /// Window size, retention and token budget
    options: SessionConfig,

    /// Conversation carried between requests
    window: ConversationWindow,

    /// Token counters for the session lifetime
    usage: TokenUsage,
}

impl TranslationSession<Groq> {
    /// Build a session talking to the Groq API
    ///
    /// With `check_api_key` set, a missing credential fails here, before any
    /// request can be made.
    pub fn from_config(config: &TranslationConfig, check_api_key: bool) -> Result<Self, ConfigError> {
        let provider = Groq::from_config(&config.provider, check_api_key)?;
        Self::new(
            provider,
            config.provider.model.clone(),
            config.session.clone(),
            config.settings.as_ref(),
        )
    }
}

impl<P: Provider> TranslationSession<P> {
    /// Create a session over any provider
    pub fn new(
        provider: P,
        model: impl Into<String>,
        options: SessionConfig,
        settings: Option<&Settings>,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let prompts = PromptConfig::resolve(settings, &options.config_key);
        let window = ConversationWindow::seeded(&prompts.sample);

        Ok(Self {
            provider,
            model: model.into(),
            prompts,
            options,
            window,
            usage: TokenUsage::new(),
        })
    }

    /// Wrap the session for use from several tasks
    pub fn into_shared(self) -> SharedSession<P> {
        Arc::new(Mutex::new(self))
    }

    /// Translate each text into `target_language`, in order
    ///
    /// Issues one request per text. The first provider failure is returned
    /// as-is; translations finished before it are discarded.
    pub async fn translate<S: AsRef<str>>(
        &mut self,
        target_language: &str,
        texts: &[S],
    ) -> Result<Vec<String>, TranslationError> {
        let mut translations = Vec::with_capacity(texts.len());

        for text in texts {
            let translated = self.request_translation(target_language, text.as_ref()).await?;
            translations.push(translated.trim().to_string());
        }

        info!(
            "Used {} tokens (Total: {})",
            self.usage.last_call_tokens, self.usage.total_tokens
        );
        Ok(translations)
    }

    async fn request_translation(&mut self, to_lang: &str, text: &str) -> Result<String, TranslationError> {
        let prompt = user_prompt(to_lang, text, self.options.escape_source_text);
        trace!("-- Groq Prompt --\n{}", self.prompts.format_prompt_log(to_lang, &prompt));

        self.window.push(ChatMessage::user(prompt));
        self.window.push(ChatMessage::assistant(CONTINUATION_SEED));
        let evicted = self.window.trim_to(self.options.max_context);

        let request = self.build_request(to_lang);
        let started = Instant::now();
        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                self.discard_pending_exchange(evicted);
                return Err(e.into());
            }
        };
        self.usage.record(&response.usage, started.elapsed());

        let content = match response.first_content() {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                self.discard_pending_exchange(evicted);
                return Err(e.into());
            }
        };
        debug!("-- Groq Response --\n{}", content);

        // Seed first, then the prompt too when replies are not retained
        self.window.pop();
        if self.options.context_retention {
            self.window.push(ChatMessage::assistant(content.clone()));
        } else {
            self.window.pop();
        }

        let cleaned = clean_reply(&content);
        if cleaned.is_empty() && !text.trim().is_empty() {
            warn!("Reply for non-empty text cleaned to an empty string: {:?}", content);
        }
        Ok(cleaned)
    }

    /// Outbound request: system message, then the whole window
    fn build_request(&self, to_lang: &str) -> ChatRequest {
        let system = ChatMessage::system(self.prompts.system_prompt(to_lang));
        ChatRequest::new(self.model.clone(), self.window.with_system(system))
            .max_tokens(self.options.max_output_tokens())
            .temperature(self.prompts.temperature)
            .top_p(self.prompts.top_p)
            .stop(self.options.stop_sequence.clone())
    }

    /// Undo a request that produced no reply: drop its seed and prompt and
    /// bring back whatever the trim evicted
    fn discard_pending_exchange(&mut self, evicted: Vec<ChatMessage>) {
        self.window.pop();
        self.window.pop();
        self.window.restore_front(evicted);
    }

    pub fn window(&self) -> &ConversationWindow {
        &self.window
    }

    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    pub fn prompts(&self) -> &PromptConfig {
        &self.prompts
    }

    pub fn options(&self) -> &SessionConfig {
        &self.options
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
