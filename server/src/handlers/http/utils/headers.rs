use hyper::Request;
use hyper::header::HeaderMap;
use tracing::debug;

/// Extract a header value as a string
pub fn get_header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(|s| {
        debug!("Retrieved header: {}", name);
        s.to_string()
    })
}

/// Extract bearer token from Authorization header
/// Format: "Authorization: Bearer <token>"
pub fn get_bearer_token<B>(req: &Request<B>) -> Option<String> {
    get_header_value(req.headers(), "authorization").and_then(|auth| {
        let (scheme, token) = auth.trim().split_once(' ')?;
        let token = token.trim();
        if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
            debug!("Bearer token extracted");
            Some(token.to_string())
        } else {
            debug!("Authorization header is not a Bearer token");
            None
        }
    })
}
