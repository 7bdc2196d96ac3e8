//! Inflight request tracking.
//!
//! One entry per outgoing request, keyed by its token, holding everything
//! needed to apply a skeleton late or roll a prepared target back: the swap
//! target, a snapshot of its original markup, and the rule text.

use foreshadow_types::{NodeId, RequestToken, SwapStyle};
use std::collections::HashMap;

/// Bookkeeping for one outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflightEntry {
    /// The node the request will eventually swap into.
    pub target: NodeId,
    /// Snapshot of `target`'s markup at registration time; used only for
    /// rollback.
    pub original: String,
    /// Raw rule text to apply once skeleton content is available.
    pub rules: Option<String>,
    /// Registration-time swap style, retained for rollback.
    pub swap_style: SwapStyle,
    /// Set while skeleton content is not yet applied; the value is the
    /// style to use when it becomes available. Cleared once applied, or
    /// once the fetch is confirmed failed. The pending → applied
    /// transition happens at most once.
    pub pending_swap: Option<SwapStyle>,
    /// Whether skeleton content has been swapped into `target`.
    pub applied: bool,
}

impl InflightEntry {
    /// Creates an entry for a request still waiting on its skeleton.
    #[must_use]
    pub fn awaiting(
        target: NodeId,
        original: impl Into<String>,
        rules: Option<String>,
        style: SwapStyle,
    ) -> Self {
        Self {
            target,
            original: original.into(),
            rules,
            swap_style: style.clone(),
            pending_swap: Some(style),
            applied: false,
        }
    }

    /// Creates an entry whose skeleton was applied at registration time.
    #[must_use]
    pub fn applied(
        target: NodeId,
        original: impl Into<String>,
        rules: Option<String>,
        style: SwapStyle,
    ) -> Self {
        Self {
            target,
            original: original.into(),
            rules,
            swap_style: style,
            pending_swap: None,
            applied: true,
        }
    }

    /// Whether the entry is still waiting for skeleton content.
    #[must_use]
    pub fn is_awaiting(&self) -> bool {
        self.pending_swap.is_some()
    }
}

/// Per-request state between dispatch and resolution.
///
/// Purely synchronous; the owning engine wraps it in a lock. Entries are
/// removed exactly once, at reconciliation.
#[derive(Debug, Default)]
pub struct InflightRegistry {
    entries: HashMap<RequestToken, InflightEntry>,
}

impl InflightRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks a request.
    pub fn insert(&mut self, token: RequestToken, entry: InflightEntry) {
        self.entries.insert(token, entry);
    }

    /// Looks up a request's entry.
    #[must_use]
    pub fn get(&self, token: RequestToken) -> Option<&InflightEntry> {
        self.entries.get(&token)
    }

    /// Looks up a request's entry mutably.
    pub fn get_mut(&mut self, token: RequestToken) -> Option<&mut InflightEntry> {
        self.entries.get_mut(&token)
    }

    /// Stops tracking a request, returning its entry.
    pub fn remove(&mut self, token: RequestToken) -> Option<InflightEntry> {
        self.entries.remove(&token)
    }

    /// Whether a request is tracked.
    #[must_use]
    pub fn contains(&self, token: RequestToken) -> bool {
        self.entries.contains_key(&token)
    }

    /// Tokens of entries still awaiting a skeleton, in a stable order so
    /// bulk rollback is deterministic.
    #[must_use]
    pub fn awaiting_tokens(&self) -> Vec<RequestToken> {
        let mut tokens: Vec<RequestToken> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_awaiting())
            .map(|(token, _)| *token)
            .collect();
        tokens.sort_by_key(|token| token.as_uuid());
        tokens
    }

    /// Number of tracked requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no requests are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
