//! Lifecycle event payloads and the effects handlers produce.
//!
//! Each event mirrors one of the host framework's named lifecycle hooks.
//! Payloads carry everything the transition needs, already extracted from
//! the host, so the handlers stay pure functions of (state, payload).

use foreshadow_types::{NodeId, RequestToken, SwapSpec, SwapStyle};
use serde::{Deserialize, Serialize};

/// An element carrying a skeleton declaration was discovered in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDiscovered {
    /// The discovered element.
    pub element: NodeId,
    /// Raw value of the skeleton source attribute, if declared.
    pub skeleton_source: Option<String>,
}

/// An outgoing request is about to be configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Token minted for this request.
    pub token: RequestToken,
    /// The node the response will swap into.
    pub target: NodeId,
    /// The configured replacement mode for the triggering element.
    pub swap: SwapSpec,
    /// Raw value of the skeleton source attribute, if declared.
    pub skeleton_source: Option<String>,
    /// Raw value of the rule attribute, if declared.
    pub rules: Option<String>,
    /// Snapshot of the target's markup, captured by the host adapter.
    /// `None` when the host could not produce one.
    pub original: Option<String>,
    /// Whether this is a boosted / pushed-URL navigation. Boosted requests
    /// never receive a skeleton.
    pub boosted: bool,
}

/// The request is about to go out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSent {
    /// The request's token.
    pub token: RequestToken,
}

/// The host is about to swap real response content into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeforeSwap {
    /// The request's token.
    pub token: RequestToken,
    /// The node the swap actually targets.
    pub target: NodeId,
}

/// The request has fully settled (after any swap, or on failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseResolved {
    /// The request's token.
    pub token: RequestToken,
}

/// The finite set of lifecycle events the engine consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// An element was discovered during attribute processing.
    ElementDiscovered(ElementDiscovered),
    /// A request is about to be configured.
    RequestConfigured(RequestConfig),
    /// A request is about to be sent.
    RequestSent(RequestSent),
    /// Real content is about to replace a target.
    BeforeSwap(BeforeSwap),
    /// A request has fully settled.
    ResponseResolved(ResponseResolved),
    /// Page/navigation state is about to be saved.
    HistorySave,
}

/// Side effects produced by the transition handlers, executed by the
/// coordinator against the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Issue the (single) skeleton fetch for a URL.
    FetchSkeleton { url: String },
    /// Set an outgoing request header.
    SetHeader {
        token: RequestToken,
        name: String,
        value: String,
    },
    /// Mark a target as prepared-for-skeleton.
    Decorate { target: NodeId },
    /// Swap skeleton content into a target and apply its rules.
    ApplySkeleton {
        token: RequestToken,
        target: NodeId,
        html: String,
        style: SwapStyle,
        rules: Option<String>,
    },
    /// Restore a target's original markup snapshot.
    Restore {
        target: NodeId,
        content: String,
        style: SwapStyle,
    },
}
