//! Inflight registry and swap coordination for Foreshadow.
//!
//! Glues the skeleton cache and the rule engine to the host framework's
//! request lifecycle: prefetch on discovery, speculative application when a
//! request goes out, and confirm-or-rollback when the real response lands.
//!
//! # Architecture
//!
//! - **Registry** ([`InflightRegistry`]): per-request bookkeeping — the swap
//!   target, a snapshot of its original markup, the rule text, and whether a
//!   skeleton still needs to be (or already has been) applied.
//! - **Engine** ([`SkeletonEngine`]): a pure state machine. One handler per
//!   host lifecycle event, each a function of (current state, event payload)
//!   producing [`Effect`]s. No I/O happens here, which is what makes the
//!   interleavings testable without a DOM or a network.
//! - **Coordinator** ([`SwapCoordinator`]): executes effects against the
//!   host bindings, issues skeleton fetches on background tasks, and feeds
//!   their completions back into the engine.
//!
//! # Request lifecycle
//!
//! 1. **Discovery**: an element declaring a skeleton source is seen; its
//!    skeleton is prefetched (fire-and-forget, one fetch per URL ever).
//! 2. **Configure**: an outgoing request is registered under a fresh
//!    [`RequestToken`](foreshadow_types::RequestToken); if the skeleton is
//!    already loaded it is applied on the spot, otherwise the request waits.
//! 3. **Fetch completion**: waiting requests receive the skeleton in
//!    registration order, each behind a presence check so a request that
//!    already resolved is left alone.
//! 4. **Reconciliation**: when the real response swaps in (or the request
//!    dies, or page state is about to be saved), the prepared target is
//!    either left for the real swap to overwrite or restored from its
//!    snapshot — never both, never twice.

mod coordinator;
mod engine;
mod error;
mod event;
mod host;
mod inflight;
pub mod protocol;
mod resolve;

pub use coordinator::SwapCoordinator;
pub use engine::{EngineConfig, SkeletonEngine};
pub use error::{EngineError, EngineResult};
pub use event::{
    BeforeSwap, Effect, ElementDiscovered, LifecycleEvent, RequestConfig, RequestSent,
    ResponseResolved,
};
pub use host::{mock, HostBindings, HostError};
pub use inflight::{InflightEntry, InflightRegistry};
pub use protocol::SkeletonStatus;
pub use resolve::resolve_skeleton_url;
