use foreshadow_cache::{FetchError, SkeletonCache, SkeletonState};
use foreshadow_types::RequestToken;
use pretty_assertions::assert_eq;

fn failed() -> Result<String, FetchError> {
    Err(FetchError::Status { status: 404 })
}

// ── begin_fetch ──────────────────────────────────────────────────

#[test]
fn begin_fetch_claims_absent_url() {
    let mut cache = SkeletonCache::new();
    assert!(cache.begin_fetch("/cards/42"));
    assert_eq!(cache.resolve("/cards/42"), SkeletonState::Pending);
}

#[test]
fn begin_fetch_is_idempotent_while_pending() {
    let mut cache = SkeletonCache::new();
    assert!(cache.begin_fetch("/cards/42"));
    // A second claim must not issue another fetch.
    assert!(!cache.begin_fetch("/cards/42"));
}

#[test]
fn begin_fetch_noop_once_loaded() {
    let mut cache = SkeletonCache::new();
    cache.begin_fetch("/a");
    cache.complete_fetch("/a", &Ok("<div></div>".to_string()));
    assert!(!cache.begin_fetch("/a"));
    assert_eq!(
        cache.resolve("/a"),
        SkeletonState::Ready("<div></div>".to_string())
    );
}

#[test]
fn begin_fetch_noop_once_failed() {
    let mut cache = SkeletonCache::new();
    cache.begin_fetch("/a");
    cache.complete_fetch("/a", &failed());
    // Confirmed absent is terminal: no retry.
    assert!(!cache.begin_fetch("/a"));
    assert_eq!(cache.resolve("/a"), SkeletonState::ConfirmedAbsent);
}

// ── resolve ──────────────────────────────────────────────────────

#[test]
fn resolve_absent_reports_pending() {
    let cache = SkeletonCache::new();
    assert_eq!(cache.resolve("/nope"), SkeletonState::Pending);
}

#[test]
fn resolve_states_track_entry_lifecycle() {
    let mut cache = SkeletonCache::new();
    cache.begin_fetch("/a");
    assert_eq!(cache.resolve("/a"), SkeletonState::Pending);
    cache.complete_fetch("/a", &Ok("<p>hi</p>".to_string()));
    assert_eq!(cache.resolve("/a"), SkeletonState::Ready("<p>hi</p>".to_string()));
}

// ── waiters ──────────────────────────────────────────────────────

#[test]
fn waiters_drain_in_registration_order() {
    let mut cache = SkeletonCache::new();
    cache.begin_fetch("/a");

    let first = RequestToken::new();
    let second = RequestToken::new();
    let third = RequestToken::new();
    assert!(cache.register_waiter("/a", first));
    assert!(cache.register_waiter("/a", second));
    assert!(cache.register_waiter("/a", third));

    let drained = cache.complete_fetch("/a", &Ok("<div></div>".to_string()));
    assert_eq!(drained, vec![first, second, third]);
}

#[test]
fn waiters_drain_on_failure_too() {
    // Failed fetches still hand the waiters back so the engine can clear
    // their pending application state.
    let mut cache = SkeletonCache::new();
    cache.begin_fetch("/a");
    let token = RequestToken::new();
    cache.register_waiter("/a", token);

    let drained = cache.complete_fetch("/a", &failed());
    assert_eq!(drained, vec![token]);
    assert_eq!(cache.resolve("/a"), SkeletonState::ConfirmedAbsent);
}

#[test]
fn register_waiter_rejected_unless_pending() {
    let mut cache = SkeletonCache::new();
    assert!(!cache.register_waiter("/absent", RequestToken::new()));

    cache.begin_fetch("/a");
    cache.complete_fetch("/a", &Ok("x".to_string()));
    assert!(!cache.register_waiter("/a", RequestToken::new()));
}

#[test]
fn waiters_not_retained_after_resolution() {
    let mut cache = SkeletonCache::new();
    cache.begin_fetch("/a");
    cache.register_waiter("/a", RequestToken::new());
    cache.complete_fetch("/a", &Ok("x".to_string()));

    // A second completion finds no pending entry and no waiters.
    assert!(cache.complete_fetch("/a", &Ok("y".to_string())).is_empty());
}

// ── monotonicity ─────────────────────────────────────────────────

#[test]
fn complete_fetch_never_moves_backward() {
    let mut cache = SkeletonCache::new();
    cache.begin_fetch("/a");
    cache.complete_fetch("/a", &Ok("first".to_string()));

    // Late completions (success or failure) are no-ops.
    cache.complete_fetch("/a", &failed());
    assert_eq!(cache.resolve("/a"), SkeletonState::Ready("first".to_string()));
}

#[test]
fn complete_fetch_on_absent_entry_is_noop() {
    let mut cache = SkeletonCache::new();
    assert!(cache.complete_fetch("/a", &Ok("x".to_string())).is_empty());
    assert_eq!(cache.resolve("/a"), SkeletonState::Pending);
    assert!(cache.is_empty());
}

#[test]
fn len_counts_tracked_urls() {
    let mut cache = SkeletonCache::new();
    assert!(cache.is_empty());
    cache.begin_fetch("/a");
    cache.begin_fetch("/b");
    cache.begin_fetch("/a");
    assert_eq!(cache.len(), 2);
}
