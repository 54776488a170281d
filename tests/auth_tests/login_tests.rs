//! Login Tests
//!
//! Tests for the direct and challenge-response login exchanges against a
//! scripted router.

#[path = "../common/mod.rs"]
mod common;

use common::{words, ScriptedRouter};
use roslink::auth::challenge_response;
use roslink::{Client, LoginMode, RosError};

// =============================================================================
// Direct Login
// =============================================================================

#[test]
fn test_direct_login_single_round_trip() {
    let router = ScriptedRouter::start(vec![vec![vec!["!done"]]]);

    let mut client = Client::new(router.config());
    client.connect().unwrap();
    let mode = client.login("admin", "secret").unwrap();
    assert_eq!(mode, LoginMode::Direct);
    assert!(client.is_authenticated());
    client.disconnect();

    let received = router.finish();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0],
        words(&["/login", "=name=admin", "=password=secret"])
    );
}

// =============================================================================
// Challenge Login
// =============================================================================

#[test]
fn test_legacy_login_three_round_trips() {
    let router = ScriptedRouter::start(vec![
        vec![vec!["!trap", "=message=cannot log in"]],
        vec![vec!["!done", "=ret=abcd1234"]],
        vec![vec!["!done"]],
    ]);

    let mut client = Client::new(router.config());
    client.connect().unwrap();
    let mode = client.login("admin", "pass123").unwrap();
    assert_eq!(mode, LoginMode::Challenge);
    client.disconnect();

    let received = router.finish();
    assert_eq!(received.len(), 3);
    assert_eq!(received[1], words(&["/login"]));

    let expected = challenge_response("pass123", &[0xab, 0xcd, 0x12, 0x34]);
    assert_eq!(expected, "355fdfab53bef9b277912d889ba17733");
    assert_eq!(
        received[2],
        vec![
            "/login".to_string(),
            "=name=admin".to_string(),
            format!("=response=00{}", expected),
        ]
    );
}

#[test]
fn test_challenge_in_direct_reply_skips_bare_login() {
    let router = ScriptedRouter::start(vec![
        vec![vec!["!done", "=ret=abcd1234"]],
        vec![vec!["!done"]],
    ]);

    let mut client = Client::new(router.config());
    client.connect().unwrap();
    assert_eq!(client.login("admin", "pass123").unwrap(), LoginMode::Challenge);
    client.disconnect();

    let received = router.finish();
    assert_eq!(received.len(), 2);
    assert_eq!(
        received[1][2],
        "=response=00355fdfab53bef9b277912d889ba17733"
    );
}

#[test]
fn test_challenge_rejected_credentials() {
    let router = ScriptedRouter::start(vec![
        vec![vec!["!trap", "=message=cannot log in"]],
        vec![vec!["!done", "=ret=abcd1234"]],
        vec![vec!["!trap", "=message=cannot log in"]],
    ]);

    let mut client = Client::new(router.config());
    client.connect().unwrap();
    match client.login("admin", "wrong") {
        Err(RosError::Auth(message)) => assert_eq!(message, "cannot log in"),
        other => panic!("Expected auth error, got {:?}", other),
    }
    assert!(!client.is_authenticated());
    client.disconnect();
    router.finish();
}

#[test]
fn test_missing_challenge_is_auth_error() {
    let router = ScriptedRouter::start(vec![
        vec![vec!["!trap"]],
        vec![vec!["!done"]],
    ]);

    let mut client = Client::new(router.config());
    client.connect().unwrap();
    assert!(matches!(
        client.login("admin", "secret"),
        Err(RosError::Auth(_))
    ));
    client.disconnect();
    assert_eq!(router.finish().len(), 2);
}

#[test]
fn test_malformed_challenge_is_auth_error() {
    let router = ScriptedRouter::start(vec![
        vec![vec!["!trap"]],
        vec![vec!["!done", "=ret=not-hex"]],
    ]);

    let mut client = Client::new(router.config());
    client.connect().unwrap();
    assert!(matches!(
        client.login("admin", "secret"),
        Err(RosError::Auth(_))
    ));
    client.disconnect();
    router.finish();
}

// =============================================================================
// Preconditions
// =============================================================================

#[test]
fn test_login_requires_connection() {
    let mut client = Client::new(roslink::Config::default());
    assert!(matches!(
        client.login("admin", "secret"),
        Err(RosError::NotConnected)
    ));
}

#[test]
fn test_open_fails_on_rejected_login() {
    let router = ScriptedRouter::start(vec![
        vec![vec!["!trap", "=message=cannot log in"]],
        vec![vec!["!trap", "=message=cannot log in"]],
    ]);

    let result = Client::open(router.config(), "admin", "wrong");
    assert!(matches!(result, Err(RosError::Auth(_))));
    router.finish();
}
