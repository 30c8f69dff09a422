/*!
 * Best-effort recovery of the translated string from a model reply.
 *
 * The model is primed to continue inside `{'translated':'` and stopped at
 * `'}`, so a reply is usually the bare translation, sometimes wrapped in
 * leftovers of the object syntax. This is string surgery, not JSON parsing:
 * a malformed reply yields a possibly damaged string, never an error.
 */

use crate::translation::prompts::CONTINUATION_SEED;

/// Object opening used when the model answers in the few-shot format instead
const QUOTED_KEY: &str = "{\"translated\":";

/// Extract the translation from a raw reply
pub fn clean_reply(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(QUOTED_KEY) {
        let rest = rest.trim_start();
        let rest = rest.strip_prefix('"').unwrap_or(rest);
        let rest = rest.trim_end().trim_end_matches('}').trim_end();
        text = rest.strip_suffix('"').unwrap_or(rest);
    }

    let cleaned = text
        .replace(CONTINUATION_SEED, "")
        .replace('}', "")
        .replace("\\'", "'")
        .replace("\\\"", "\"");

    cleaned.trim_matches(|c| matches!(c, '\'' | '{' | '}')).to_string()
}
