//! Skeleton source resolution.

use url::Url;

/// Resolves a declared skeleton source against the current document
/// location, producing the cache key.
///
/// Keys are path+query only: the fragment is discarded, so two attribute
/// values differing only by fragment resolve to the same cache entry.
/// Unresolvable or empty values return `None` and disable the feature for
/// that element.
#[must_use]
pub fn resolve_skeleton_url(document_url: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let joined = document_url.join(raw).ok()?;
    Some(match joined.query() {
        Some(query) => format!("{}?{}", joined.path(), query),
        None => joined.path().to_string(),
    })
}
