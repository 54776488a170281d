//! Reply Parser Tests
//!
//! Tests for folding reply sentences into a CommandResult.

use roslink::protocol::{CommandResult, Outcome, ParserState, Record, ReplyParser};
use roslink::RosError;

fn parse(sentences: &[&[&str]]) -> CommandResult {
    let mut parser = ReplyParser::new();
    for &sentence in sentences {
        if parser.feed(sentence) {
            break;
        }
    }
    parser.finish()
}

// =============================================================================
// Success Tests
// =============================================================================

#[test]
fn test_single_record() {
    let result = parse(&[&["!re", "=name=MyRouter"], &["!done"]]);

    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.message, None);
    assert_eq!(result.records, vec![Record::from_iter([("name", "MyRouter")])]);
}

#[test]
fn test_multiple_records_keep_order() {
    let result = parse(&[
        &["!re", "=.id=*1", "=name=ether1", "=running=true"],
        &["!re", "=.id=*2", "=name=ether2", "=running=false"],
        &["!done"],
    ]);

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].id(), Some("*1"));
    assert_eq!(result.records[1].get("name"), Some("ether2"));

    let keys: Vec<_> = result.records[0].keys().collect();
    assert_eq!(keys, vec![".id", "name", "running"]);
}

#[test]
fn test_done_without_records() {
    let result = parse(&[&["!done"]]);
    assert!(result.is_success());
    assert!(result.records.is_empty());
}

#[test]
fn test_done_attributes_are_top_level() {
    let result = parse(&[&["!done", "=ret=*1A"]]);
    assert!(result.is_success());
    assert!(result.records.is_empty());
    assert_eq!(result.attribute("ret"), Some("*1A"));
}

#[test]
fn test_value_may_contain_equals() {
    let result = parse(&[&["!re", "=comment=a=b=c", "=empty="], &["!done"]]);
    let record = result.first().unwrap();
    assert_eq!(record.get("comment"), Some("a=b=c"));
    assert_eq!(record.get("empty"), Some(""));
}

#[test]
fn test_record_with_no_attributes() {
    let result = parse(&[&["!re"], &["!re", "=name=x"], &["!done"]]);
    assert_eq!(result.records.len(), 2);
    assert!(result.records[0].is_empty());
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_trap_with_message() {
    let result = parse(&[&["!trap", "=message=no such item"]]);

    assert_eq!(result.outcome, Outcome::Error);
    assert_eq!(result.message.as_deref(), Some("no such item"));
    assert!(result.records.is_empty());
}

#[test]
fn test_trap_after_records_keeps_records() {
    let result = parse(&[
        &["!re", "=name=a"],
        &["!trap", "=category=2", "=message=interrupted"],
    ]);

    assert!(result.is_error());
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.attribute("category"), Some("2"));
    assert_eq!(result.message.as_deref(), Some("interrupted"));
}

#[test]
fn test_trap_without_message() {
    let result = parse(&[&["!trap"]]);
    assert!(result.is_error());
    assert_eq!(result.message, None);

    match result.into_result() {
        Err(RosError::Trap(message)) => assert_eq!(message, "command failed"),
        other => panic!("Expected trap error, got {:?}", other),
    }
}

#[test]
fn test_fatal_message_is_plain_word() {
    let result = parse(&[&["!fatal", "session terminated on request"]]);
    assert!(result.is_error());
    assert_eq!(
        result.message.as_deref(),
        Some("session terminated on request")
    );
}

#[test]
fn test_into_result() {
    let ok = parse(&[&["!done"]]).into_result();
    assert!(ok.is_ok());

    let err = parse(&[&["!trap", "=message=failure: already have such name"]]).into_result();
    match err {
        Err(RosError::Trap(message)) => {
            assert_eq!(message, "failure: already have such name")
        }
        other => panic!("Expected trap error, got {:?}", other),
    }
}

// =============================================================================
// State Machine Tests
// =============================================================================

#[test]
fn test_state_transitions() {
    let mut parser = ReplyParser::new();
    assert_eq!(*parser.state(), ParserState::Idle);

    assert!(!parser.feed(&["!re", "=name=a"]));
    assert_eq!(
        *parser.state(),
        ParserState::InRecord(Record::from_iter([("name", "a")]))
    );

    assert!(parser.feed(&["!done"]));
    assert_eq!(*parser.state(), ParserState::Done);
    assert!(parser.is_terminal());
}

#[test]
fn test_sentences_after_terminal_are_ignored() {
    let mut parser = ReplyParser::new();
    assert!(parser.feed(&["!trap", "=message=bad"]));
    assert!(parser.feed(&["!done"]));
    assert!(parser.feed(&["!re", "=name=late"]));

    let result = parser.finish();
    assert!(result.is_error());
    assert!(result.records.is_empty());
}

#[test]
fn test_unknown_words_are_skipped() {
    let result = parse(&[
        &["!re", ".tag=7", "=name=a", "=novalue", "garbage"],
        &["!done", ".tag=7"],
    ]);
    assert!(result.is_success());
    assert_eq!(result.records, vec![Record::from_iter([("name", "a")])]);
}

#[test]
fn test_finish_closes_open_record() {
    let mut parser = ReplyParser::new();
    parser.feed(&["!re", "=name=partial"]);
    let result = parser.finish();
    assert_eq!(result.records.len(), 1);
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn test_json_field_set() {
    let result = parse(&[&["!trap", "=message=no such item"]]);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], true);
    assert_eq!(json["message"], "no such item");
    assert_eq!(json["records"], serde_json::json!([]));
    assert_eq!(json.as_object().unwrap().len(), 4);
}
