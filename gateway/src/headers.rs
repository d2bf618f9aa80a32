// Header policy shared by all verbs: authorization normalization and the
// platform's two-header revision convention. The revision is reported in a
// custom header, with a standard ETag as the fallback on resource families
// that never adopted it; the same opaque value goes back out on If-Match
// for conditional writes.

use http::HeaderMap;
use http::header::ETAG;

/// Primary revision header; takes precedence over the ETag fallback.
pub const REVISION_HEADER: &str = "ac-revision";

/// Reads the revision token from a response's headers. Absent both header
/// names, the resource does not support conditional writes.
pub fn extract_revision(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REVISION_HEADER)
        .or_else(|| headers.get(ETAG))
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Normalizes a caller-supplied token into a bearer credential. Tokens that
/// already carry a `Bearer ` prefix are not double-wrapped.
pub fn bearer(token: &str) -> String {
    let token = token.trim();
    let token = token
        .strip_prefix("Bearer ")
        .or_else(|| token.strip_prefix("bearer "))
        .unwrap_or(token);

    format!("Bearer {token}")
}
