use foreshadow_engine::{InflightEntry, InflightRegistry};
use foreshadow_types::{NodeId, RequestToken, SwapStyle};

fn awaiting_entry() -> InflightEntry {
    InflightEntry::awaiting(NodeId::new(), "<p>before</p>", None, SwapStyle::InnerHtml)
}

// ── InflightEntry ────────────────────────────────────────────────

#[test]
fn awaiting_entry_has_pending_swap() {
    let entry = awaiting_entry();
    assert!(entry.is_awaiting());
    assert!(!entry.applied);
    assert_eq!(entry.pending_swap, Some(SwapStyle::InnerHtml));
    assert_eq!(entry.swap_style, SwapStyle::InnerHtml);
}

#[test]
fn applied_entry_has_no_pending_swap() {
    let entry = InflightEntry::applied(
        NodeId::new(),
        "<p>before</p>",
        Some("title.textContent=\"Loading\"".to_string()),
        SwapStyle::OuterHtml,
    );
    assert!(!entry.is_awaiting());
    assert!(entry.applied);
    assert_eq!(entry.pending_swap, None);
    assert_eq!(entry.swap_style, SwapStyle::OuterHtml);
}

#[test]
fn entry_keeps_original_snapshot() {
    let entry = awaiting_entry();
    assert_eq!(entry.original, "<p>before</p>");
}

// ── InflightRegistry ─────────────────────────────────────────────

#[test]
fn insert_and_get() {
    let mut registry = InflightRegistry::new();
    let token = RequestToken::new();
    registry.insert(token, awaiting_entry());

    assert!(registry.contains(token));
    assert!(registry.get(token).unwrap().is_awaiting());
    assert_eq!(registry.len(), 1);
}

#[test]
fn get_missing_token() {
    let registry = InflightRegistry::new();
    assert!(registry.get(RequestToken::new()).is_none());
    assert!(registry.is_empty());
}

#[test]
fn remove_returns_entry_once() {
    let mut registry = InflightRegistry::new();
    let token = RequestToken::new();
    registry.insert(token, awaiting_entry());

    assert!(registry.remove(token).is_some());
    // Removed exactly once; a second removal finds nothing.
    assert!(registry.remove(token).is_none());
    assert!(!registry.contains(token));
}

#[test]
fn get_mut_transitions_to_applied() {
    let mut registry = InflightRegistry::new();
    let token = RequestToken::new();
    registry.insert(token, awaiting_entry());

    let entry = registry.get_mut(token).unwrap();
    let style = entry.pending_swap.take().unwrap();
    entry.applied = true;

    assert_eq!(style, SwapStyle::InnerHtml);
    let entry = registry.get(token).unwrap();
    assert!(!entry.is_awaiting());
    assert!(entry.applied);
}

#[test]
fn awaiting_tokens_skips_applied_entries() {
    let mut registry = InflightRegistry::new();
    let waiting = RequestToken::new();
    let done = RequestToken::new();
    registry.insert(waiting, awaiting_entry());
    registry.insert(
        done,
        InflightEntry::applied(NodeId::new(), "x", None, SwapStyle::InnerHtml),
    );

    assert_eq!(registry.awaiting_tokens(), vec![waiting]);
}

#[test]
fn awaiting_tokens_empty_registry() {
    assert!(InflightRegistry::new().awaiting_tokens().is_empty());
}
