/*!
 * Tests for language code resolution
 */

use mantra::language_utils::{iso_code_name, resolve_language_name, translator_code_name};

#[test]
fn test_resolve_language_name_with_translator_code_should_use_table() {
    assert_eq!(resolve_language_name("ENG").unwrap(), "English");
    assert_eq!(resolve_language_name("cht").unwrap(), "Traditional Chinese");
    assert_eq!(resolve_language_name("PTB").unwrap(), "Portuguese");
}

#[test]
fn test_resolve_language_name_with_iso_code_should_use_isolang() {
    assert_eq!(resolve_language_name("en").unwrap(), "English");
    assert_eq!(resolve_language_name("fr").unwrap(), "French");
}

#[test]
fn test_resolve_language_name_with_name_should_pass_through() {
    assert_eq!(resolve_language_name("Brazilian Portuguese").unwrap(), "Brazilian Portuguese");
}

#[test]
fn test_resolve_language_name_with_unknown_code_should_fail() {
    assert!(resolve_language_name("zz").is_err());
    assert!(resolve_language_name("   ").is_err());
}

#[test]
fn test_translator_code_name_with_unknown_code_should_be_none() {
    assert_eq!(translator_code_name("XYZ"), None);
    assert_eq!(iso_code_name("english"), None);
}
