//! Declarative slot-rule language for Foreshadow skeletons.
//!
//! A rule string customizes a freshly inserted skeleton before it is shown:
//! a `;`-separated list of clauses, each `<path>=<json-literal>`, where the
//! first path segment names a slot (an element inside the skeleton carrying
//! a matching `slot` attribute) and the remainder selects one of a closed
//! set of settable properties:
//!
//! - `<slot>.textContent = "..."` — replace the slot's text content
//! - `<slot>.attributes.<name> = "..."` — set an attribute on the slot
//! - `<slot>.hidden = true|false` — toggle the slot's visibility
//!
//! Unknown paths and wrongly-typed values are rejected explicitly; the bulk
//! parser skips them with a log so a bad clause can never take down the
//! request it decorates.

mod rule;

pub use rule::{parse_rules, RuleError, SlotMutation, SlotOp};

/// Result type for rule parsing.
pub type RuleResult<T> = std::result::Result<T, RuleError>;
