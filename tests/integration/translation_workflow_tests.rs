/*!
 * End-to-end translation scenarios against a scripted provider
 */

use mantra::providers::mock::MockProvider;
use mantra::providers::Role;
use mantra::translation::CONTINUATION_SEED;
use mantra::{resolve_language_name, SessionConfig};

use crate::common::{mock_session, options};

#[tokio::test]
async fn test_translate_japanese_greeting_into_english_should_return_hello() {
    let mock = MockProvider::scripted([("{'translated':'Hello'}}", 42)]);
    let mut session = mock_session(mock, SessionConfig::default());

    let result = session.translate("English", &["こんにちは"]).await.unwrap();

    assert_eq!(result, vec!["Hello"]);

    let requests = session.provider().requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    assert_eq!(request.messages[0].role, Role::System);
    assert!(request.messages[0].content.contains("English"));
    assert!(!request.messages[0].content.contains("{to_lang}"));

    let final_user = request
        .messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .expect("request should contain a user message");
    assert!(final_user.content.contains("こんにちは"));
    assert!(final_user.content.contains("Translate the following text into English."));

    assert_eq!(request.messages.last().map(|m| m.content.as_str()), Some(CONTINUATION_SEED));
    assert_eq!(session.usage().total_tokens, 42);
}

#[tokio::test]
async fn test_first_request_should_start_with_example_pair() {
    let mut session = mock_session(MockProvider::new(), SessionConfig::default());

    session.translate("English", &["やあ"]).await.unwrap();

    let request = session.provider().last_request().unwrap();
    let roles: Vec<Role> = request.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant, Role::User, Role::Assistant]);
    assert!(request.messages[1].content.contains("untranslated"));
    assert!(request.messages[2].content.contains("translated"));
}

#[tokio::test]
async fn test_chapter_with_retention_should_carry_narrative_context() {
    let panels = ["おはよう", "元気？", "うん、元気だよ", "よかった"];
    let replies = [
        ("Good morning'", 30),
        ("How are you?'", 31),
        ("Yeah, I'm good'", 32),
        ("{'translated':'Glad to hear'}", 33),
    ];
    let mut session = mock_session(MockProvider::scripted(replies), options(true, 20));
    let language = resolve_language_name("ENG").unwrap();

    let result = session.translate(&language, &panels).await.unwrap();

    assert_eq!(result, vec!["Good morning", "How are you?", "Yeah, I'm good", "Glad to hear"]);
    assert_eq!(session.usage().total_tokens, 126);
    assert_eq!(session.usage().last_call_tokens, 33);

    let last_request = session.provider().last_request().unwrap();
    assert!(last_request.messages.iter().any(|m| m.content == "Yeah, I'm good'"));
    assert!(last_request.messages.iter().any(|m| m.content.contains("おはよう")));
}

#[tokio::test]
async fn test_chapter_without_retention_should_send_only_current_line() {
    let panels = ["おはよう", "元気？", "よかった"];
    let mut session = mock_session(MockProvider::new(), options(false, 20));

    session.translate("English", &panels).await.unwrap();

    for (request, panel) in session.provider().requests().iter().zip(panels) {
        assert_eq!(request.messages.len(), 5);
        assert!(request.messages[3].content.contains(panel));
    }
}

#[tokio::test]
async fn test_session_reused_across_jobs_should_keep_counters() {
    let mut session = mock_session(MockProvider::new(), options(true, 20));

    session.translate("English", &["一"]).await.unwrap();
    session.translate("French", &["二"]).await.unwrap();

    assert_eq!(session.usage().requests, 2);
    let last_request = session.provider().last_request().unwrap();
    assert!(last_request.messages[0].content.contains("French"));
}
