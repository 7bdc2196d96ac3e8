//! Declarative markup surface and outgoing header protocol.
//!
//! A cooperating server can read the two outgoing headers to render a
//! different response shape while a skeleton is on screen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outgoing request header carrying the resolved skeleton URL.
pub const SKELETON_SOURCE_HEADER: &str = "X-Skeleton-Source";

/// Outgoing request header carrying skeleton readiness at send time.
pub const SKELETON_STATUS_HEADER: &str = "X-Skeleton-Status";

/// Element attribute naming the skeleton source, resolved as a URL
/// relative to the page. The host's attribute lookup covers the `data-`
/// fallback.
pub const SOURCE_ATTRIBUTE: &str = "skeleton-src";

/// Element attribute holding the slot-rule string.
pub const RULES_ATTRIBUTE: &str = "skeleton-rules";

/// Marker attribute naming a slot inside skeleton markup.
pub const SLOT_ATTRIBUTE: &str = "slot";

/// Skeleton readiness as reported to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkeletonStatus {
    /// The skeleton was not applied (still fetching, or confirmed absent).
    Preparing,
    /// The skeleton was swapped in before the request went out.
    Prepared,
}

impl SkeletonStatus {
    /// The wire form sent in [`SKELETON_STATUS_HEADER`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preparing => "preparing",
            Self::Prepared => "prepared",
        }
    }
}

impl fmt::Display for SkeletonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
