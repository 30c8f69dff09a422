use anyhow::{anyhow, Result};
use isolang::Language;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Language utilities for target-language resolution
///
/// The session expects a language name ("English", "Simplified Chinese").
/// Callers usually hold a translator code such as `ENG` or `CHS`, or an
/// ISO 639-1 / 639-3 code; these helpers turn either into the name.
static TRANSLATOR_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("CHS", "Simplified Chinese"),
        ("CHT", "Traditional Chinese"),
        ("CSY", "Czech"),
        ("NLD", "Dutch"),
        ("ENG", "English"),
        ("FRA", "French"),
        ("DEU", "German"),
        ("HUN", "Hungarian"),
        ("ITA", "Italian"),
        ("JPN", "Japanese"),
        ("KOR", "Korean"),
        ("PLK", "Polish"),
        ("PTB", "Portuguese"),
        ("ROM", "Romanian"),
        ("RUS", "Russian"),
        ("ESP", "Spanish"),
        ("TRK", "Turkish"),
        ("UKR", "Ukrainian"),
        ("VIN", "Vietnamese"),
        ("CNR", "Montenegrin"),
        ("SRP", "Serbian"),
        ("HRV", "Croatian"),
        ("ARA", "Arabic"),
        ("THA", "Thai"),
        ("IND", "Indonesian"),
    ])
});

/// All translator codes, sorted
pub fn supported_codes() -> Vec<&'static str> {
    let mut codes: Vec<_> = TRANSLATOR_CODES.keys().copied().collect();
    codes.sort_unstable();
    codes
}

/// Look up a translator code (case-insensitive)
pub fn translator_code_name(code: &str) -> Option<&'static str> {
    TRANSLATOR_CODES.get(code.trim().to_uppercase().as_str()).copied()
}

/// Look up an ISO 639-1 or 639-3 code
pub fn iso_code_name(code: &str) -> Option<String> {
    let normalized = code.trim().to_lowercase();
    let language = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }?;
    Some(language.to_name().to_string())
}

/// Resolve a code or name to the language name sent to the model
///
/// Translator codes win over ISO codes (`FRA`, `ITA` and friends exist in
/// both tables with the same meaning). Anything longer than three
/// characters is taken to be a language name already.
pub fn resolve_language_name(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Target language cannot be empty"));
    }

    if let Some(name) = translator_code_name(trimmed) {
        return Ok(name.to_string());
    }

    if let Some(name) = iso_code_name(trimmed) {
        return Ok(name);
    }

    if trimmed.chars().count() > 3 {
        return Ok(trimmed.to_string());
    }

    Err(anyhow!(
        "Unknown language code: {} (supported: {})",
        input,
        supported_codes().join(", ")
    ))
}
