/*!
 * Prompt templates for contextual panel translation.
 *
 * Holds the default system template, the few-shot example pair, the
 * continuation seed and the builders that turn a source line into the user
 * message sent to the model. Every value except the seed can be overridden
 * through the settings map (see `PromptConfig::resolve`).
 */

use serde::{Deserialize, Serialize};

use crate::app_config::{resolve_setting, Settings};

/// Placeholder replaced by the target language name
pub const LANGUAGE_PLACEHOLDER: &str = "{to_lang}";

/// Opening fragment of the JSON object the model is primed to continue
pub const CONTINUATION_SEED: &str = "{'translated':'";

pub const DEFAULT_TEMPERATURE: f32 = 0.3;

pub const DEFAULT_TOP_P: f32 = 0.92;

/// Default system prompt; `{to_lang}` is replaced at request time
pub const DEFAULT_SYSTEM_TEMPLATE: &str = concat!(
    "You are a professional manga translation engine. Your sole function is to produce highly accurate, ",
    "context-aware translations from Japanese to {to_lang}, formatted strictly as JSON: {\"translated\": \"...\"}.\n\n",
    "Analyze prior and current panels as an interconnected narrative. Consider speaker tone, implied relationships, ",
    "and sequential dialogue to deliver the most accurate meaning possible.\n\n",
    "Obey these rules:\n",
    "1. Translate accurately with contextual precision. Do not over-literalize nor over-localize.\n",
    "2. Preserve honorifics, Japanese names, and cultural expressions as-is (e.g., '-san', 'Senpai'). Do not convert them.\n",
    "3. Do not infer or assign gender unless explicitly stated. Default to neutral language or implicit phrasing.\n",
    "4. Proper names must follow standard Hepburn romanization and be preserved exactly as in the source (e.g., '弥生' → 'Yayoi').\n",
    "5. For ambiguous or slang terms, choose the most common conversational meaning unless context indicates otherwise. ",
    "If uncertain, use phonetic transliteration.\n",
    "6. Preserve original meaning and nuance. Imperatives, questions, emotional tone, and slang must match intent.\n",
    "7. Do not summarize or explain. Do not include any output except: {\"translated\": \"...\"}\n",
    "8. Retain original onomatopoeia and sound effects unless context explicitly requires translation.\n",
    "9. Maintain a natural, anime-style cadence and tone when translating dialogue.\n",
    "10. Do not expand or compress the text significantly. Keep translation length close to the original where possible.\n\n",
    "Remember: You are a language model tuned specifically for manga. Your job is to make the reading experience smooth, ",
    "authentic, and respectful to the source material.\n",
    "Translate now into {to_lang} and return only JSON."
);

/// User half of the default few-shot example
pub const DEFAULT_SAMPLE_USER: &str = concat!(
    "Translate into English. Return the result in JSON format.\n",
    r#"{"untranslated": "<|1|>恥ずかしい… 目立ちたくない… 私が消えたい…\n<|2|>きみ… 大丈夫⁉\n<|3|>なんだこいつ 空気読めて ないのか…？"}"#,
    "\n"
);

/// Assistant half of the default few-shot example
pub const DEFAULT_SAMPLE_ASSISTANT: &str = r#"{"translated": "<|1|>So embarrassing… I don’t want to stand out… I wish I could disappear…\n<|2|>Hey… Are you okay!?\n<|3|>What’s with this person? Can’t they read the room…?"}"#;

/// Example exchange seeded at the start of every conversation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct FewShotPair {
    pub user: String,
    pub assistant: String,
}

impl From<(String, String)> for FewShotPair {
    fn from((user, assistant): (String, String)) -> Self {
        Self { user, assistant }
    }
}

impl From<FewShotPair> for (String, String) {
    fn from(pair: FewShotPair) -> Self {
        (pair.user, pair.assistant)
    }
}

impl Default for FewShotPair {
    fn default() -> Self {
        Self {
            user: DEFAULT_SAMPLE_USER.to_string(),
            assistant: DEFAULT_SAMPLE_ASSISTANT.to_string(),
        }
    }
}

/// Prompt and sampling values, resolved once per session
#[derive(Debug, Clone, PartialEq)]
pub struct PromptConfig {
    pub system_template: String,
    pub sample: FewShotPair,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_template: DEFAULT_SYSTEM_TEMPLATE.to_string(),
            sample: FewShotPair::default(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

impl PromptConfig {
    /// Resolve every value through `namespace.key`, `key`, then the default
    pub fn resolve(settings: Option<&Settings>, namespace: &str) -> Self {
        let defaults = Self::default();
        Self {
            system_template: resolve_setting(settings, namespace, "chat_system_template", defaults.system_template),
            sample: resolve_setting(settings, namespace, "chat_sample", defaults.sample),
            temperature: resolve_setting(settings, namespace, "temperature", defaults.temperature),
            top_p: resolve_setting(settings, namespace, "top_p", defaults.top_p),
        }
    }

    /// System message with the target language substituted
    pub fn system_prompt(&self, to_lang: &str) -> String {
        self.system_template.replace(LANGUAGE_PLACEHOLDER, to_lang)
    }

    /// Multi-line dump of the full prompt, for trace logging
    pub fn format_prompt_log(&self, to_lang: &str, prompt: &str) -> String {
        let system = self.system_prompt(to_lang);
        [
            "System:",
            system.as_str(),
            "User:",
            self.sample.user.as_str(),
            "Assistant:",
            self.sample.assistant.as_str(),
            "User:",
            prompt,
        ]
        .join("\n")
    }
}

/// Build the per-line user message
///
/// Without `escape`, the text goes into the envelope verbatim, so quotes in
/// the source break its JSON shape.
pub fn user_prompt(to_lang: &str, text: &str, escape: bool) -> String {
    let body = if escape { escape_json_string(text) } else { text.to_string() };
    format!(
        "Translate the following text into {}. Return the result in JSON format.\n\n{{\"untranslated\": \"{}\"}}\n",
        to_lang, body
    )
}

/// JSON string escaping without the surrounding quotes
fn escape_json_string(text: &str) -> String {
    let quoted = serde_json::Value::String(text.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
