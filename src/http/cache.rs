//! HTTP cache control module
//!
//! `ETag` generation, conditional request matching, and the cache policy
//! applied to each class of asset.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Generate a quoted `ETag` from response content using fast hashing
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if the client's `If-None-Match` header matches the server's `ETag`
///
/// Handles comma-separated lists and the `*` wildcard. Returns true when
/// the request should be answered with 304.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Cache policy per asset class
///
/// Bundler output is content-hashed under `assets/`, so those files never
/// change in place and may be cached forever. The entry document (and
/// anything else that can change between deploys) must revalidate every
/// time, otherwise stale clients keep loading dead bundle URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Content-hashed bundle output
    Immutable,
    /// Entry document and other unhashed files
    Revalidate,
}

impl CachePolicy {
    /// Pick the policy for a request path relative to the asset root
    pub fn for_asset(relative_path: &str, content_type: &str) -> Self {
        if content_type.starts_with("text/html") {
            return Self::Revalidate;
        }
        if Path::new(relative_path).starts_with("assets") {
            Self::Immutable
        } else {
            Self::Revalidate
        }
    }

    /// Cache-Control header value
    pub const fn header_value(self) -> &'static str {
        match self {
            Self::Immutable => "public, max-age=31536000, immutable",
            Self::Revalidate => "no-cache",
        }
    }
}
