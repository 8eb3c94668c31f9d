use parley_llm::{ChatOptions, ChatRequest, Message, Role};

#[test]
fn test_message_constructors() {
    assert_eq!(Message::system("Be brief").role(), "system");
    assert_eq!(Message::user("Hello").role(), "user");
    assert_eq!(Message::assistant("Hi there!").role(), "assistant");
}

#[test]
fn test_message_serialization_user() {
    let msg = Message::user("Hello");
    let json = serde_json::to_string(&msg).unwrap();
    assert_eq!(json, r#"{"role":"user","content":"Hello"}"#);
}

#[test]
fn test_message_deserialization() {
    let json = r#"{"role":"assistant","content":"Test"}"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.content, "Test");
}

#[test]
fn test_unknown_role_is_rejected() {
    let json = r#"{"role":"tool","content":"42"}"#;
    assert!(serde_json::from_str::<Message>(json).is_err());
}

#[test]
fn test_chat_request_with_options() {
    let request = ChatRequest::new("gpt-4o-mini", vec![Message::user("Hello")])
        .with_options(ChatOptions::new().temperature(0.7).max_tokens(100));

    assert_eq!(request.model, "gpt-4o-mini");
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.options.temperature, Some(0.7));
    assert_eq!(request.options.max_tokens, Some(100));
}

#[test]
fn test_chat_options_default() {
    let options = ChatOptions::default();
    assert_eq!(options.temperature, None);
    assert_eq!(options.max_tokens, None);
}
