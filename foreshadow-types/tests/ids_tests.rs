use foreshadow_types::{NodeId, RequestToken};
use std::collections::HashSet;
use std::str::FromStr;

// ── RequestToken ─────────────────────────────────────────────────

#[test]
fn request_token_new_is_unique() {
    let a = RequestToken::new();
    let b = RequestToken::new();
    assert_ne!(a, b);
}

#[test]
fn request_token_from_uuid_roundtrip() {
    let uuid = uuid::Uuid::now_v7();
    let token = RequestToken::from_uuid(uuid);
    assert_eq!(token.as_uuid(), uuid);
}

#[test]
fn request_token_display_and_parse() {
    let token = RequestToken::new();
    let s = token.to_string();
    let parsed = RequestToken::parse(&s).unwrap();
    assert_eq!(token, parsed);
}

#[test]
fn request_token_from_str() {
    let token = RequestToken::new();
    let parsed: RequestToken = RequestToken::from_str(&token.to_string()).unwrap();
    assert_eq!(token, parsed);
}

#[test]
fn request_token_parse_invalid() {
    assert!(RequestToken::parse("not-a-uuid").is_err());
}

#[test]
fn request_token_hash_and_eq() {
    let token = RequestToken::new();
    let mut set = HashSet::new();
    set.insert(token);
    set.insert(token); // duplicate
    assert_eq!(set.len(), 1);
}

#[test]
fn request_token_serde_transparent() {
    let token = RequestToken::new();
    let json = serde_json::to_string(&token).unwrap();
    assert_eq!(json, format!("\"{token}\""));
    let back: RequestToken = serde_json::from_str(&json).unwrap();
    assert_eq!(back, token);
}

// ── NodeId ───────────────────────────────────────────────────────

#[test]
fn node_id_new_is_unique() {
    let a = NodeId::new();
    let b = NodeId::new();
    assert_ne!(a, b);
}

#[test]
fn node_id_display_and_parse() {
    let id = NodeId::new();
    let parsed = NodeId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn node_id_from_str_invalid() {
    assert!(NodeId::from_str("garbage").is_err());
}

#[test]
fn node_id_default_is_unique() {
    let a = NodeId::default();
    let b = NodeId::default();
    assert_ne!(a, b);
}
