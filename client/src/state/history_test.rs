use super::*;

#[test]
fn empty_prompt_is_single_user_line() {
    let log = HistoryLog::new();
    assert_eq!(log.prompt_with("Hello"), "User: Hello");
    assert!(log.is_empty());
}

#[test]
fn prompt_appends_after_existing_turns() {
    let mut log = HistoryLog::new();
    log.push_turn("Hello", "Hi!");
    assert_eq!(log.prompt_with("How are you?"), "User: Hello\nChiku: Hi!\nUser: How are you?");
    assert_eq!(log.len(), 2);
}

#[test]
fn push_turn_keeps_order() {
    let mut log = HistoryLog::new();
    log.push_turn("a", "1");
    log.push_turn("b", "2");
    assert_eq!(log.lines(), ["User: a", "Chiku: 1", "User: b", "Chiku: 2"]);
    assert_eq!(log.serialize(), "User: a\nChiku: 1\nUser: b\nChiku: 2");
}

#[test]
fn serializes_as_plain_string_array() {
    let log = HistoryLog::from_lines(vec!["User: a".into(), "Chiku: b".into()]);
    assert_eq!(serde_json::to_value(&log).unwrap(), serde_json::json!(["User: a", "Chiku: b"]));
}
