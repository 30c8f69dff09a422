/*!
 * Contextual translation over a chat-completion provider.
 *
 * - `session`: the stateful translator driving one request per line
 * - `window`: rolling conversation window carried between requests
 * - `prompts`: system template, few-shot pair and user message builders
 * - `cleanup`: recovery of the translated string from a primed reply
 * - `usage`: token accounting
 */

// Re-export main types for easier usage
pub use self::cleanup::clean_reply;
pub use self::prompts::{FewShotPair, PromptConfig, CONTINUATION_SEED};
pub use self::session::{SharedSession, TranslationSession};
pub use self::usage::TokenUsage;
pub use self::window::ConversationWindow;

// Submodules
pub mod cleanup;
pub mod prompts;
pub mod session;
pub mod usage;
pub mod window;
