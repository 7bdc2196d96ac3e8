//! Rule clause parsing.

use crate::RuleResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// One of the closed set of operations a rule may perform on a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SlotOp {
    /// Replace the slot's text content.
    SetText { value: String },
    /// Set an attribute on the slot element.
    SetAttribute { name: String, value: String },
    /// Toggle the slot's visibility.
    SetHidden { hidden: bool },
}

/// A parsed rule clause: one operation on one named slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotMutation {
    /// The slot the operation targets, matched against the skeleton's
    /// `slot` marker attribute.
    pub slot: String,
    /// The operation to perform.
    pub op: SlotOp,
}

/// Errors produced while parsing a rule clause.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The clause is empty after trimming. The bulk parser skips these
    /// silently so trailing `;` separators cost nothing.
    #[error("empty rule clause")]
    EmptyClause,

    /// The clause has no `=` assignment.
    #[error("rule clause has no assignment: {0:?}")]
    MissingAssignment(String),

    /// The left-hand side names no slot.
    #[error("rule clause has no slot name: {0:?}")]
    MissingSlot(String),

    /// The path selects a property outside the supported schema.
    #[error("unknown slot property: {0:?}")]
    UnknownProperty(String),

    /// The right-hand side is not a valid JSON literal.
    #[error("invalid rule value: {0}")]
    InvalidValue(#[from] serde_json::Error),

    /// The value's JSON type does not match the property.
    #[error("rule value for {property:?} must be a JSON {expected}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
    },
}

impl SlotMutation {
    /// Parses a single rule clause of the form `<slot>.<property>=<json>`.
    ///
    /// The clause is split on the first `=`, both sides trimmed, and the
    /// right-hand side decoded as a JSON literal. The property path is
    /// validated against the closed schema; anything else is rejected
    /// with [`RuleError::UnknownProperty`].
    pub fn parse(clause: &str) -> RuleResult<Self> {
        let clause = clause.trim();
        if clause.is_empty() {
            return Err(RuleError::EmptyClause);
        }

        let Some(eq) = clause.find('=') else {
            return Err(RuleError::MissingAssignment(clause.to_string()));
        };
        let (path, literal) = clause.split_at(eq);
        let path = path.trim();
        let literal = literal[1..].trim();

        let mut segments = path.split('.');
        let slot = segments.next().unwrap_or_default().trim();
        if slot.is_empty() {
            return Err(RuleError::MissingSlot(clause.to_string()));
        }
        let property: Vec<&str> = segments.map(str::trim).collect();

        let value: Value = serde_json::from_str(literal)?;
        let op = Self::select_op(path, &property, value)?;

        Ok(Self {
            slot: slot.to_string(),
            op,
        })
    }

    /// Matches a property path against the closed schema.
    fn select_op(path: &str, property: &[&str], value: Value) -> RuleResult<SlotOp> {
        match property {
            ["textContent"] => match value {
                Value::String(s) => Ok(SlotOp::SetText { value: s }),
                _ => Err(RuleError::TypeMismatch {
                    property: path.to_string(),
                    expected: "string",
                }),
            },
            ["hidden"] => match value {
                Value::Bool(b) => Ok(SlotOp::SetHidden { hidden: b }),
                _ => Err(RuleError::TypeMismatch {
                    property: path.to_string(),
                    expected: "boolean",
                }),
            },
            ["attributes", name] if !name.is_empty() => match value {
                Value::String(s) => Ok(SlotOp::SetAttribute {
                    name: (*name).to_string(),
                    value: s,
                }),
                _ => Err(RuleError::TypeMismatch {
                    property: path.to_string(),
                    expected: "string",
                }),
            },
            _ => Err(RuleError::UnknownProperty(path.to_string())),
        }
    }
}

/// Parses a whole rule string into its valid mutations.
///
/// Clauses are separated by `;`. Malformed clauses are skipped with a log;
/// empty clauses are skipped silently. Never fails — a bad rule string
/// degrades to fewer mutations, not an error.
pub fn parse_rules(source: &str) -> Vec<SlotMutation> {
    source
        .split(';')
        .filter_map(|clause| match SlotMutation::parse(clause) {
            Ok(mutation) => Some(mutation),
            Err(RuleError::EmptyClause) => None,
            Err(err) => {
                warn!(clause, %err, "skipping malformed skeleton rule clause");
                None
            }
        })
        .collect()
}
