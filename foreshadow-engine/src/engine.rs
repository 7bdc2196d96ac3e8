//! Transition engine — stateful coordination logic without I/O.
//!
//! The engine is a pure state machine: one handler per lifecycle event,
//! each consuming a payload and producing [`Effect`]s. The coordinator
//! handles all I/O (fetching, swapping, header mutation).

use crate::error::EngineResult;
use crate::event::{
    BeforeSwap, Effect, ElementDiscovered, LifecycleEvent, RequestConfig, RequestSent,
    ResponseResolved,
};
use crate::inflight::{InflightEntry, InflightRegistry};
use crate::protocol::{
    SkeletonStatus, RULES_ATTRIBUTE, SKELETON_SOURCE_HEADER, SKELETON_STATUS_HEADER,
    SOURCE_ATTRIBUTE,
};
use crate::resolve::resolve_skeleton_url;
use foreshadow_cache::{FetchResult, SkeletonCache, SkeletonState};
use foreshadow_types::RequestToken;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};
use url::Url;

/// Configuration for the transition engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// The current document location; skeleton sources resolve against it.
    pub document_url: Url,
    /// Attribute naming an element's skeleton source.
    pub source_attribute: String,
    /// Attribute holding an element's rule string.
    pub rules_attribute: String,
}

impl EngineConfig {
    /// Creates a config with the default attribute names.
    #[must_use]
    pub fn new(document_url: Url) -> Self {
        Self {
            document_url,
            source_attribute: SOURCE_ATTRIBUTE.to_string(),
            rules_attribute: RULES_ATTRIBUTE.to_string(),
        }
    }

    /// Creates a config from a document URL string.
    pub fn for_document(document_url: &str) -> EngineResult<Self> {
        Ok(Self::new(Url::parse(document_url)?))
    }
}

/// The transition engine — consumes lifecycle events, manages the cache
/// and the inflight registry, produces effects.
///
/// Both stores are injectable so tests can seed or inspect them; the
/// engine itself performs no I/O. Cloning yields a handle over the same
/// stores.
#[derive(Clone)]
pub struct SkeletonEngine {
    config: EngineConfig,
    cache: Arc<RwLock<SkeletonCache>>,
    inflight: Arc<RwLock<InflightRegistry>>,
}

impl SkeletonEngine {
    /// Creates an engine with fresh stores.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(RwLock::new(SkeletonCache::new())),
            Arc::new(RwLock::new(InflightRegistry::new())),
        )
    }

    /// Creates an engine over existing stores.
    #[must_use]
    pub fn with_stores(
        config: EngineConfig,
        cache: Arc<RwLock<SkeletonCache>>,
        inflight: Arc<RwLock<InflightRegistry>>,
    ) -> Self {
        Self {
            config,
            cache,
            inflight,
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dispatches a lifecycle event to its handler.
    pub async fn handle(&self, event: LifecycleEvent) -> Vec<Effect> {
        match event {
            LifecycleEvent::ElementDiscovered(ev) => self.on_element_discovered(ev).await,
            LifecycleEvent::RequestConfigured(ev) => self.on_request_configured(ev).await,
            LifecycleEvent::RequestSent(ev) => self.on_request_sent(ev).await,
            LifecycleEvent::BeforeSwap(ev) => self.on_before_swap(ev).await,
            LifecycleEvent::ResponseResolved(ev) => self.on_response_resolved(ev).await,
            LifecycleEvent::HistorySave => self.on_history_save().await,
        }
    }

    // ── Transition handlers ──────────────────────────────────────

    /// Element discovery: fire-and-forget prefetch of its skeleton.
    pub async fn on_element_discovered(&self, event: ElementDiscovered) -> Vec<Effect> {
        let Some(raw) = event.skeleton_source.as_deref() else {
            return Vec::new();
        };
        let Some(url) = resolve_skeleton_url(&self.config.document_url, raw) else {
            return Vec::new();
        };
        if self.cache.write().await.begin_fetch(&url) {
            debug!(element = %event.element, url, "prefetching skeleton");
            vec![Effect::FetchSkeleton { url }]
        } else {
            Vec::new()
        }
    }

    /// Request configuration: register the request and apply the skeleton
    /// now if it is already loaded, otherwise queue as a waiter.
    pub async fn on_request_configured(&self, event: RequestConfig) -> Vec<Effect> {
        let RequestConfig {
            token,
            target,
            swap,
            skeleton_source,
            rules,
            original,
            boosted,
        } = event;

        let Some(raw) = skeleton_source.as_deref() else {
            return Vec::new();
        };
        if boosted {
            debug!(%token, "boosted navigation; skipping skeleton");
            return Vec::new();
        }
        if !swap.style.supports_skeleton() {
            debug!(%token, style = %swap.style, "swap style cannot host a skeleton");
            return Vec::new();
        }
        let Some(url) = resolve_skeleton_url(&self.config.document_url, raw) else {
            return Vec::new();
        };

        let mut effects = vec![Effect::SetHeader {
            token,
            name: SKELETON_SOURCE_HEADER.to_string(),
            value: url.clone(),
        }];

        // Lock order is always cache, then registry.
        let mut cache = self.cache.write().await;
        let mut inflight = self.inflight.write().await;

        match cache.resolve(&url) {
            SkeletonState::Ready(html) => {
                let Some(original) = original else {
                    error!(%token, "cannot snapshot skeleton target; skipping application");
                    effects.push(status_header(token, SkeletonStatus::Preparing));
                    return effects;
                };
                inflight.insert(
                    token,
                    InflightEntry::applied(target, original, rules.clone(), swap.style.clone()),
                );
                effects.push(status_header(token, SkeletonStatus::Prepared));
                effects.push(Effect::ApplySkeleton {
                    token,
                    target,
                    html,
                    style: swap.style,
                    rules,
                });
            }
            SkeletonState::Pending => {
                let Some(original) = original else {
                    error!(%token, "cannot snapshot skeleton target; skipping application");
                    effects.push(status_header(token, SkeletonStatus::Preparing));
                    return effects;
                };
                if cache.begin_fetch(&url) {
                    effects.push(Effect::FetchSkeleton { url: url.clone() });
                }
                cache.register_waiter(&url, token);
                inflight.insert(
                    token,
                    InflightEntry::awaiting(target, original, rules, swap.style),
                );
                effects.push(status_header(token, SkeletonStatus::Preparing));
                effects.push(Effect::Decorate { target });
            }
            SkeletonState::ConfirmedAbsent => {
                debug!(%token, url, "skeleton confirmed absent; request proceeds bare");
                effects.push(status_header(token, SkeletonStatus::Preparing));
            }
        }

        effects
    }

    /// Request send: report the definitive readiness at send time.
    pub async fn on_request_sent(&self, event: RequestSent) -> Vec<Effect> {
        let inflight = self.inflight.read().await;
        let Some(entry) = inflight.get(event.token) else {
            return Vec::new();
        };
        let status = if entry.applied {
            SkeletonStatus::Prepared
        } else {
            SkeletonStatus::Preparing
        };
        vec![status_header(event.token, status)]
    }

    /// Fetch completion: notify every waiter in registration order, each
    /// behind a presence check — a request whose entry is already gone is
    /// left alone.
    pub async fn on_fetch_complete(
        &self,
        url: &str,
        outcome: &FetchResult<String>,
    ) -> Vec<Effect> {
        let mut cache = self.cache.write().await;
        let mut inflight = self.inflight.write().await;
        let waiters = cache.complete_fetch(url, outcome);
        drop(cache);

        let mut effects = Vec::new();
        match outcome {
            Ok(html) => {
                for token in waiters {
                    let Some(entry) = inflight.get_mut(token) else {
                        debug!(%token, "waiter already resolved; skipping skeleton");
                        continue;
                    };
                    let Some(style) = entry.pending_swap.take() else {
                        continue;
                    };
                    entry.applied = true;
                    effects.push(Effect::ApplySkeleton {
                        token,
                        target: entry.target,
                        html: html.clone(),
                        style,
                        rules: entry.rules.clone(),
                    });
                }
            }
            Err(_) => {
                // Waiters proceed without a skeleton; clear their pending
                // application so nothing rolls back an untouched target.
                for token in waiters {
                    if let Some(entry) = inflight.get_mut(token) {
                        entry.pending_swap = None;
                    }
                }
            }
        }
        effects
    }

    /// Real content is about to replace a target: stop tracking, and
    /// restore the snapshot when the skeleton never arrived and the swap
    /// lands somewhere other than the prepared target.
    pub async fn on_before_swap(&self, event: BeforeSwap) -> Vec<Effect> {
        let Some(entry) = self.inflight.write().await.remove(event.token) else {
            return Vec::new();
        };
        if entry.is_awaiting() && event.target != entry.target {
            debug!(token = %event.token, "restoring original content before retargeted swap");
            vec![Effect::Restore {
                target: entry.target,
                content: entry.original,
                style: entry.swap_style,
            }]
        } else {
            Vec::new()
        }
    }

    /// Terminal reconciliation for a settled request whose entry is still
    /// present: the real content never replaced the prepared target, so
    /// anything we did to it is undone.
    pub async fn on_response_resolved(&self, event: ResponseResolved) -> Vec<Effect> {
        let Some(entry) = self.inflight.write().await.remove(event.token) else {
            return Vec::new();
        };
        if entry.is_awaiting() || entry.applied {
            debug!(token = %event.token, "request settled without replacing its target; restoring");
            vec![Effect::Restore {
                target: entry.target,
                content: entry.original,
                style: entry.swap_style,
            }]
        } else {
            Vec::new()
        }
    }

    /// Page state is about to be saved: proactively roll back every
    /// request still awaiting its skeleton so the captured DOM never
    /// reflects a half-prepared target.
    pub async fn on_history_save(&self) -> Vec<Effect> {
        let mut inflight = self.inflight.write().await;
        let tokens = inflight.awaiting_tokens();
        tokens
            .into_iter()
            .filter_map(|token| {
                inflight.remove(token).map(|entry| Effect::Restore {
                    target: entry.target,
                    content: entry.original,
                    style: entry.swap_style,
                })
            })
            .collect()
    }

    /// Reverts an entry to inert after the host failed to insert its
    /// skeleton; the request proceeds bare and nothing rolls back.
    pub async fn abort_application(&self, token: RequestToken) {
        if let Some(entry) = self.inflight.write().await.get_mut(token) {
            entry.pending_swap = None;
            entry.applied = false;
        }
    }

    // ── Introspection (tests, adapters) ──────────────────────────

    /// Whether a request is currently tracked.
    pub async fn is_tracked(&self, token: RequestToken) -> bool {
        self.inflight.read().await.contains(token)
    }

    /// A snapshot of a request's entry.
    pub async fn entry(&self, token: RequestToken) -> Option<InflightEntry> {
        self.inflight.read().await.get(token).cloned()
    }

    /// The cache's current state for a resolved URL.
    pub async fn skeleton_state(&self, url: &str) -> SkeletonState {
        self.cache.read().await.resolve(url)
    }
}

fn status_header(token: RequestToken, status: SkeletonStatus) -> Effect {
    Effect::SetHeader {
        token,
        name: SKELETON_STATUS_HEADER.to_string(),
        value: status.as_str().to_string(),
    }
}
