//! Swap styles and swap specifications.
//!
//! A swap style is the host framework's configured replacement mode for a
//! triggering element. Skeleton application only proceeds for the two
//! whole-subtree styles; everything else passes through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the host replaces a target's markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SwapStyle {
    /// Replace the target's children.
    InnerHtml,
    /// Replace the target itself.
    OuterHtml,
    /// Any other host-specific style (beforeend, delete, none, ...).
    Other(String),
}

impl SwapStyle {
    /// Parses a host-reported style string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "innerHTML" => Self::InnerHtml,
            "outerHTML" => Self::OuterHtml,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire form the host understands.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InnerHtml => "innerHTML",
            Self::OuterHtml => "outerHTML",
            Self::Other(s) => s,
        }
    }

    /// Whether a skeleton can be swapped in under this style.
    ///
    /// Only the whole-subtree styles qualify; partial-insertion styles
    /// cannot be rolled back from a single markup snapshot.
    #[must_use]
    pub fn supports_skeleton(&self) -> bool {
        matches!(self, Self::InnerHtml | Self::OuterHtml)
    }
}

impl fmt::Display for SwapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SwapStyle {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<SwapStyle> for String {
    fn from(style: SwapStyle) -> Self {
        style.as_str().to_string()
    }
}

/// The configured replacement mode for a triggering element, as reported
/// by the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapSpec {
    /// The swap style.
    pub style: SwapStyle,
}

impl SwapSpec {
    /// Creates a swap spec with the given style.
    #[must_use]
    pub fn new(style: SwapStyle) -> Self {
        Self { style }
    }
}

impl Default for SwapSpec {
    fn default() -> Self {
        Self {
            style: SwapStyle::InnerHtml,
        }
    }
}
