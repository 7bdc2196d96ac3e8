//! Cache entry state tracking.
//!
//! Entries are keyed by resolved URL and move `absent → pending →
//! (loaded | failed)`, monotonically. A pending entry carries the waiters
//! that registered before the fetch resolved, in registration order.

use crate::error::FetchResult;
use foreshadow_types::RequestToken;
use std::collections::HashMap;
use tracing::{debug, warn};

/// What the cache knows about a URL right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonState {
    /// Content is loaded and ready to apply.
    Ready(String),
    /// A fetch is (or should be) in flight; callers register as waiters.
    /// Also reported for an absent entry, where the caller is expected to
    /// call [`SkeletonCache::begin_fetch`] first.
    Pending,
    /// The fetch failed permanently. No skeleton will ever materialize for
    /// this URL; callers must not keep polling.
    ConfirmedAbsent,
}

#[derive(Debug)]
enum CacheEntry {
    Pending { waiters: Vec<RequestToken> },
    Loaded { html: String },
    Failed,
}

/// The skeleton prefetch cache.
///
/// Purely synchronous; the owning engine wraps it in a lock and issues the
/// actual fetches. All waiter bookkeeping happens here so the engine can
/// notify waiters in registration order on completion.
#[derive(Debug, Default)]
pub struct SkeletonCache {
    entries: HashMap<String, CacheEntry>,
}

impl SkeletonCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state for a URL.
    #[must_use]
    pub fn resolve(&self, url: &str) -> SkeletonState {
        match self.entries.get(url) {
            Some(CacheEntry::Loaded { html }) => SkeletonState::Ready(html.clone()),
            Some(CacheEntry::Failed) => SkeletonState::ConfirmedAbsent,
            Some(CacheEntry::Pending { .. }) | None => SkeletonState::Pending,
        }
    }

    /// Claims the right to fetch a URL.
    ///
    /// If no entry exists, a pending entry is created and `true` is
    /// returned: the caller must issue exactly one fetch and report the
    /// outcome via [`complete_fetch`](Self::complete_fetch). If an entry
    /// already exists in any state, nothing happens and `false` is
    /// returned. At most one fetch is ever issued per URL.
    pub fn begin_fetch(&mut self, url: &str) -> bool {
        if self.entries.contains_key(url) {
            return false;
        }
        debug!(url, "skeleton fetch pending");
        self.entries
            .insert(url.to_string(), CacheEntry::Pending { waiters: Vec::new() });
        true
    }

    /// Registers a waiter on a pending entry.
    ///
    /// Returns `false` (and does nothing) unless the entry is pending:
    /// resolved entries keep no waiter list.
    pub fn register_waiter(&mut self, url: &str, token: RequestToken) -> bool {
        match self.entries.get_mut(url) {
            Some(CacheEntry::Pending { waiters }) => {
                waiters.push(token);
                true
            }
            _ => false,
        }
    }

    /// Resolves a pending entry with the fetch outcome and drains its
    /// waiters, in registration order.
    ///
    /// On failure the entry becomes confirmed-absent; the failure is
    /// logged, never propagated. The waiters are still returned so the
    /// engine can clear their pending application state — they receive no
    /// skeleton. Completing a non-pending entry is a logged no-op (a
    /// late completion after the entry already resolved).
    pub fn complete_fetch(
        &mut self,
        url: &str,
        outcome: &FetchResult<String>,
    ) -> Vec<RequestToken> {
        let Some(CacheEntry::Pending { waiters }) = self.entries.get_mut(url) else {
            debug!(url, "ignoring fetch completion for non-pending entry");
            return Vec::new();
        };
        let waiters = std::mem::take(waiters);
        match outcome {
            Ok(html) => {
                debug!(url, waiters = waiters.len(), "skeleton loaded");
                self.entries
                    .insert(url.to_string(), CacheEntry::Loaded { html: html.clone() });
            }
            Err(err) => {
                warn!(url, %err, "skeleton fetch failed; confirmed absent");
                self.entries.insert(url.to_string(), CacheEntry::Failed);
            }
        }
        waiters
    }

    /// Number of tracked URLs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache tracks no URLs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
