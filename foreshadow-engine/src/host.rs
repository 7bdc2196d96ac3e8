//! Host capability abstraction.
//!
//! The host framework supplies the swap primitive, attribute lookup, and
//! request header mutation; the engine consumes them behind this trait so
//! tests can substitute a deterministic fake for a live DOM.

use foreshadow_rules::SlotMutation;
use foreshadow_types::{NodeId, RequestToken, SwapSpec, SwapStyle};
use thiserror::Error;

/// Errors the host can report back to the coordinator.
#[derive(Debug, Error)]
pub enum HostError {
    /// The framework failed to produce the element a swap should land in.
    #[error("missing re-insertion point for node {0}")]
    MissingTarget(NodeId),
}

/// Capabilities supplied by the host framework.
///
/// All methods are synchronous: DOM mutation and attribute lookup never
/// suspend. The attribute lookup is expected to cover the host's `data-`
/// prefix fallback.
pub trait HostBindings: Send + Sync {
    /// Replaces `target`'s inner or outer markup with `content`.
    fn swap(&self, target: NodeId, content: &str, style: &SwapStyle) -> Result<(), HostError>;

    /// The configured replacement mode for a triggering element.
    fn swap_spec(&self, element: NodeId) -> SwapSpec;

    /// Attribute lookup, including the host's data-attribute fallback.
    fn attribute(&self, element: NodeId, name: &str) -> Option<String>;

    /// Captures the markup that `style` would replace on `target`.
    /// `None` when the target is unknown to the host.
    fn snapshot(&self, target: NodeId, style: &SwapStyle) -> Option<String>;

    /// Sets an outgoing request header.
    fn set_header(&self, token: RequestToken, name: &str, value: &str);

    /// Marks a target as prepared-for-skeleton (marker class).
    fn decorate(&self, target: NodeId);

    /// Applies one slot mutation inside the subtree rooted at `root`.
    /// Returns `false` when the named slot does not exist there.
    fn apply_slot_mutation(&self, root: NodeId, mutation: &SlotMutation) -> bool;
}

/// A mock host for testing.
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// One recorded swap.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SwapRecord {
        /// The swapped node.
        pub target: NodeId,
        /// The markup swapped in.
        pub content: String,
        /// The style used.
        pub style: SwapStyle,
    }

    /// One recorded header mutation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HeaderRecord {
        /// The request the header was set on.
        pub token: RequestToken,
        /// Header name.
        pub name: String,
        /// Header value.
        pub value: String,
    }

    /// An in-memory host: a flat node table plus recorders for every
    /// side effect the coordinator can produce.
    #[derive(Debug, Default)]
    pub struct MockHost {
        attributes: Mutex<HashMap<(NodeId, String), String>>,
        markup: Mutex<HashMap<NodeId, String>>,
        specs: Mutex<HashMap<NodeId, SwapSpec>>,
        slots: Mutex<HashSet<(NodeId, String)>>,
        missing: Mutex<HashSet<NodeId>>,
        swap_failures: Mutex<HashSet<NodeId>>,
        swaps: Mutex<Vec<SwapRecord>>,
        headers: Mutex<Vec<HeaderRecord>>,
        decorated: Mutex<Vec<NodeId>>,
        mutations: Mutex<Vec<(NodeId, SlotMutation)>>,
    }

    impl MockHost {
        /// Creates an empty mock host.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Mints a node with the given markup and a default (innerHTML)
        /// swap spec.
        pub fn element(&self, markup: impl Into<String>) -> NodeId {
            let node = NodeId::new();
            self.markup.lock().unwrap().insert(node, markup.into());
            node
        }

        /// Sets an attribute on a node.
        pub fn set_attribute(&self, node: NodeId, name: impl Into<String>, value: impl Into<String>) {
            self.attributes
                .lock()
                .unwrap()
                .insert((node, name.into()), value.into());
        }

        /// Sets a node's swap spec.
        pub fn set_spec(&self, node: NodeId, spec: SwapSpec) {
            self.specs.lock().unwrap().insert(node, spec);
        }

        /// Declares that a slot exists inside a node's subtree.
        pub fn add_slot(&self, node: NodeId, slot: impl Into<String>) {
            self.slots.lock().unwrap().insert((node, slot.into()));
        }

        /// Makes a node unknown to the host: snapshots return `None` and
        /// swaps fail with [`HostError::MissingTarget`].
        pub fn remove_node(&self, node: NodeId) {
            self.missing.lock().unwrap().insert(node);
            self.markup.lock().unwrap().remove(&node);
        }

        /// Makes swaps into a node fail while leaving it snapshot-able,
        /// as when the framework loses the insertion point mid-flight.
        pub fn fail_swaps_into(&self, node: NodeId) {
            self.swap_failures.lock().unwrap().insert(node);
        }

        /// Current markup of a node.
        #[must_use]
        pub fn markup_of(&self, node: NodeId) -> Option<String> {
            self.markup.lock().unwrap().get(&node).cloned()
        }

        /// Every swap performed, in order.
        pub fn swaps(&self) -> Vec<SwapRecord> {
            self.swaps.lock().unwrap().clone()
        }

        /// Every header set, in order.
        pub fn headers(&self) -> Vec<HeaderRecord> {
            self.headers.lock().unwrap().clone()
        }

        /// Values set for one header on one request, in order.
        pub fn header_values(&self, token: RequestToken, name: &str) -> Vec<String> {
            self.headers
                .lock()
                .unwrap()
                .iter()
                .filter(|h| h.token == token && h.name == name)
                .map(|h| h.value.clone())
                .collect()
        }

        /// Every node decorated, in order.
        pub fn decorated(&self) -> Vec<NodeId> {
            self.decorated.lock().unwrap().clone()
        }

        /// Every slot mutation applied, in order.
        pub fn mutations(&self) -> Vec<(NodeId, SlotMutation)> {
            self.mutations.lock().unwrap().clone()
        }
    }

    impl HostBindings for MockHost {
        fn swap(&self, target: NodeId, content: &str, style: &SwapStyle) -> Result<(), HostError> {
            if self.missing.lock().unwrap().contains(&target)
                || self.swap_failures.lock().unwrap().contains(&target)
            {
                return Err(HostError::MissingTarget(target));
            }
            self.markup
                .lock()
                .unwrap()
                .insert(target, content.to_string());
            self.swaps.lock().unwrap().push(SwapRecord {
                target,
                content: content.to_string(),
                style: style.clone(),
            });
            Ok(())
        }

        fn swap_spec(&self, element: NodeId) -> SwapSpec {
            self.specs
                .lock()
                .unwrap()
                .get(&element)
                .cloned()
                .unwrap_or_default()
        }

        fn attribute(&self, element: NodeId, name: &str) -> Option<String> {
            self.attributes
                .lock()
                .unwrap()
                .get(&(element, name.to_string()))
                .cloned()
        }

        fn snapshot(&self, target: NodeId, _style: &SwapStyle) -> Option<String> {
            if self.missing.lock().unwrap().contains(&target) {
                return None;
            }
            self.markup.lock().unwrap().get(&target).cloned()
        }

        fn set_header(&self, token: RequestToken, name: &str, value: &str) {
            self.headers.lock().unwrap().push(HeaderRecord {
                token,
                name: name.to_string(),
                value: value.to_string(),
            });
        }

        fn decorate(&self, target: NodeId) {
            self.decorated.lock().unwrap().push(target);
        }

        fn apply_slot_mutation(&self, root: NodeId, mutation: &SlotMutation) -> bool {
            if !self
                .slots
                .lock()
                .unwrap()
                .contains(&(root, mutation.slot.clone()))
            {
                return false;
            }
            self.mutations.lock().unwrap().push((root, mutation.clone()));
            true
        }
    }
}
