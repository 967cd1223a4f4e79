//! Static asset serving module
//!
//! Resolves request paths against the asset root and serves matching
//! files; anything that does not match a file gets the entry document
//! instead, so client-side routes render the app shell rather than 404.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::cache::{check_etag_match, generate_etag, CachePolicy};
use crate::http::{self, mime, ByteRange};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// A file resolved within the asset root
pub struct LoadedAsset {
    pub content: Vec<u8>,
    /// Path relative to the asset root, used for MIME and cache decisions
    pub relative_path: String,
}

/// Serve a request path: matching file, or the fallback document
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let index_file = &state.config.assets.index_file;
    match load_asset(&state.asset_root, ctx.path, index_file).await {
        Some(asset) => respond_with_asset(ctx, &asset),
        None => serve_fallback(ctx, state).await,
    }
}

/// Serve the entry document for a path with no matching file
///
/// A missing entry document is the only way this handler produces a 404.
async fn serve_fallback(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let index_file = &state.config.assets.index_file;
    let index_path = state.asset_root.join(index_file);
    match fs::read(&index_path).await {
        Ok(content) => respond_with_asset(
            ctx,
            &LoadedAsset {
                content,
                relative_path: index_file.clone(),
            },
        ),
        Err(e) => {
            logger::log_error(&format!(
                "Fallback document missing '{}': {e}",
                index_path.display()
            ));
            http::build_404_response()
        }
    }
}

/// Resolve a request path to a regular file inside the asset root
///
/// Returns None when no file matches, which the caller turns into the
/// fallback document rather than an error.
pub async fn load_asset(
    asset_root: &Path,
    request_path: &str,
    index_file: &str,
) -> Option<LoadedAsset> {
    // Decode before the dot-segment check so %2e%2e does not slip past it
    let Some(decoded) = percent_decode(request_path) else {
        logger::log_warning(&format!("Malformed percent-encoding: {request_path}"));
        return None;
    };
    let relative = decoded.trim_start_matches('/');

    // Dot segments never resolve to assets
    if relative.split('/').any(|seg| seg == "..") {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return None;
    }

    let mut file_path = asset_root.join(relative);

    // Directory requests map to the index document inside that directory
    if relative.is_empty() || relative.ends_with('/') || file_path.is_dir() {
        file_path = file_path.join(index_file);
    }

    // Unmatched paths are the common case (client-side routes), not worth
    // logging
    let canonical = file_path.canonicalize().ok()?;
    if !canonical.starts_with(asset_root) {
        logger::log_warning(&format!(
            "Escaped asset root, refused: {request_path} -> {}",
            canonical.display()
        ));
        return None;
    }
    if !canonical.is_file() {
        return None;
    }

    let content = match fs::read(&canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read asset '{}': {e}",
                canonical.display()
            ));
            return None;
        }
    };

    let relative_path = canonical
        .strip_prefix(asset_root)
        .unwrap_or(&canonical)
        .to_string_lossy()
        .into_owned();

    Some(LoadedAsset {
        content,
        relative_path,
    })
}

/// Decode `%XX` escapes in a request path
///
/// Returns None for truncated or non-hex escapes and for sequences that do
/// not form valid UTF-8; those paths cannot name an asset.
fn percent_decode(path: &str) -> Option<String> {
    if !path.contains('%') {
        return Some(path.to_string());
    }

    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hi = (hex[0] as char).to_digit(16)?;
            let lo = (hex[1] as char).to_digit(16)?;
            out.push(u8::try_from(hi * 16 + lo).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Build the response for a resolved asset: conditional GET, range
/// requests, then the full body
fn respond_with_asset(ctx: &RequestContext<'_>, asset: &LoadedAsset) -> Response<Full<Bytes>> {
    let content_type = mime::content_type_for(Path::new(&asset.relative_path));
    let policy = CachePolicy::for_asset(&asset.relative_path, content_type);
    let etag = generate_etag(&asset.content);
    let total_size = asset.content.len();

    if check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::response::build_304_response(&etag, policy.header_value());
    }

    match http::parse_range_header(ctx.range_header.as_deref(), total_size) {
        ByteRange::Slice { start, end } => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(asset.content[start..=end].to_vec())
            };
            http::response::build_partial_response(
                body,
                content_type,
                &etag,
                start,
                end,
                total_size,
                ctx.is_head,
            )
        }
        ByteRange::Unsatisfiable => http::build_416_response(total_size),
        ByteRange::Full => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(asset.content.clone())
            };
            http::response::build_asset_response(
                body,
                content_type,
                &etag,
                policy.header_value(),
                ctx.is_head,
            )
        }
    }
}
