/*!
 * Tests for reply cleanup through the public API
 */

use mantra::translation::clean_reply;

#[test]
fn test_clean_reply_with_primed_object_should_yield_value() {
    assert_eq!(clean_reply("{'translated':'Hello'}"), "Hello");
}

#[test]
fn test_clean_reply_with_extra_braces_should_yield_value() {
    assert_eq!(clean_reply("{'translated':'Hello'}}"), "Hello");
}

#[test]
fn test_clean_reply_with_placeholders_should_keep_markers() {
    let raw = "<|1|>So embarrassing…\\n<|2|>Are you okay!?'";
    assert_eq!(clean_reply(raw), "<|1|>So embarrassing…\\n<|2|>Are you okay!?");
}

#[test]
fn test_clean_reply_applied_twice_should_equal_once() {
    for raw in ["{'translated':'Hi'}", "Hi'", "  {'translated':'It\\'s'} ", "plain"] {
        let once = clean_reply(raw);
        assert_eq!(clean_reply(&once), once);
    }
}

#[test]
fn test_clean_reply_with_inner_braces_should_drop_them() {
    assert_eq!(clean_reply("a {b} c'"), "a {b c");
}
