//! Swap coordinator — executes engine effects against the host.
//!
//! The coordinator is the only place where I/O happens: it reads
//! attributes and snapshots from the host to build event payloads, runs
//! the engine's transition for each lifecycle event, then carries out the
//! returned effects (header mutation, decoration, swaps, and the actual
//! skeleton fetches on background tasks).

use crate::engine::SkeletonEngine;
use crate::error::EngineResult;
use crate::event::{
    BeforeSwap, Effect, ElementDiscovered, RequestConfig, RequestSent, ResponseResolved,
};
use crate::host::HostBindings;
use foreshadow_cache::SkeletonFetcher;
use foreshadow_rules::parse_rules;
use foreshadow_types::{NodeId, RequestToken, SwapStyle};
use std::sync::Arc;
use tracing::{debug, error};

/// Glues the transition engine to the host framework and the network.
///
/// Cloning yields a handle over the same engine, host, and fetcher; fetch
/// completions are fed back from background tasks through such a handle.
#[derive(Clone)]
pub struct SwapCoordinator {
    engine: SkeletonEngine,
    host: Arc<dyn HostBindings>,
    fetcher: Arc<dyn SkeletonFetcher>,
}

impl SwapCoordinator {
    /// Creates a coordinator.
    pub fn new(
        engine: SkeletonEngine,
        host: Arc<dyn HostBindings>,
        fetcher: Arc<dyn SkeletonFetcher>,
    ) -> Self {
        Self {
            engine,
            host,
            fetcher,
        }
    }

    /// Returns the underlying engine.
    pub fn engine(&self) -> &SkeletonEngine {
        &self.engine
    }

    // ── Lifecycle entry points ───────────────────────────────────

    /// An element was discovered during attribute processing; prefetch
    /// its skeleton if it declares one.
    pub async fn element_discovered(&self, element: NodeId) {
        let source = self
            .host
            .attribute(element, &self.engine.config().source_attribute);
        let effects = self
            .engine
            .on_element_discovered(ElementDiscovered {
                element,
                skeleton_source: source,
            })
            .await;
        self.run_effects(effects).await;
    }

    /// An outgoing request is about to be configured. Mints and returns
    /// the token the host adapter must thread through every subsequent
    /// event for this request.
    pub async fn request_configured(
        &self,
        element: NodeId,
        target: NodeId,
        boosted: bool,
    ) -> RequestToken {
        let token = RequestToken::new();
        let config = self.engine.config();
        let source = self.host.attribute(element, &config.source_attribute);
        let rules = self.host.attribute(element, &config.rules_attribute);
        let swap = self.host.swap_spec(element);
        let original = if source.is_some() && swap.style.supports_skeleton() {
            self.host.snapshot(target, &swap.style)
        } else {
            None
        };

        let effects = self
            .engine
            .on_request_configured(RequestConfig {
                token,
                target,
                swap,
                skeleton_source: source,
                rules,
                original,
                boosted,
            })
            .await;
        self.run_effects(effects).await;
        token
    }

    /// The request is about to go out on the wire.
    pub async fn request_sent(&self, token: RequestToken) {
        let effects = self.engine.on_request_sent(RequestSent { token }).await;
        self.run_effects(effects).await;
    }

    /// Real content is about to replace `target`.
    pub async fn before_swap(&self, token: RequestToken, target: NodeId) {
        let effects = self.engine.on_before_swap(BeforeSwap { token, target }).await;
        self.run_effects(effects).await;
    }

    /// The request has fully settled.
    pub async fn response_resolved(&self, token: RequestToken) {
        let effects = self
            .engine
            .on_response_resolved(ResponseResolved { token })
            .await;
        self.run_effects(effects).await;
    }

    /// Page/navigation state is about to be saved.
    pub async fn history_save(&self) {
        let effects = self.engine.on_history_save().await;
        self.run_effects(effects).await;
    }

    // ── Effect execution ─────────────────────────────────────────

    async fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchSkeleton { url } => self.spawn_fetch(url),
                other => self.run_effect(other).await,
            }
        }
    }

    /// Issues the single fetch for a URL on a background task and feeds
    /// the completion back through the engine. Waiters are notified (and
    /// their effects executed) before the task finishes.
    fn spawn_fetch(&self, url: String) {
        let this = self.clone();
        tokio::spawn(async move {
            let outcome = this.fetcher.fetch(&url).await;
            let effects = this.engine.on_fetch_complete(&url, &outcome).await;
            for effect in effects {
                // Completion effects never start another fetch.
                this.run_effect(effect).await;
            }
        });
    }

    async fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::FetchSkeleton { url } => {
                debug!(url, "unexpected fetch effect at execution stage; dropping");
            }
            Effect::SetHeader { token, name, value } => {
                self.host.set_header(token, &name, &value);
            }
            Effect::Decorate { target } => self.host.decorate(target),
            Effect::ApplySkeleton {
                token,
                target,
                html,
                style,
                rules,
            } => {
                if let Err(err) = self.apply_skeleton(target, &html, &style, rules.as_deref()) {
                    error!(%token, %err, "failed to insert skeleton; request proceeds bare");
                    self.engine.abort_application(token).await;
                }
            }
            Effect::Restore {
                target,
                content,
                style,
            } => {
                if let Err(err) = self.host.swap(target, &content, &style) {
                    error!(%err, "failed to restore original content");
                }
            }
        }
    }

    /// Swaps skeleton markup into the target, then decorates it through
    /// the rule engine, best-effort per clause.
    fn apply_skeleton(
        &self,
        target: NodeId,
        html: &str,
        style: &SwapStyle,
        rules: Option<&str>,
    ) -> EngineResult<()> {
        self.host.swap(target, html, style)?;
        if let Some(source) = rules {
            for mutation in parse_rules(source) {
                if !self.host.apply_slot_mutation(target, &mutation) {
                    debug!(slot = %mutation.slot, "skeleton slot not found; skipping rule");
                }
            }
        }
        Ok(())
    }
}
