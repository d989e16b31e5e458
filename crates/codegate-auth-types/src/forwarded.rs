//! Forwarded request context supplied by the reverse proxy on forward-auth calls.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::HeaderMap;
use http::request::Parts;

pub const X_FORWARDED_HOST: &str = "x-forwarded-host";
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
pub const X_FORWARDED_URI: &str = "x-forwarded-uri";

/// The original host, scheme and path of the request being gated.
///
/// Every field is optional; the extractor never rejects. Callers decide what
/// a missing host means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedContext {
    pub host: Option<String>,
    pub proto: Option<String>,
    pub uri: Option<String>,
}

impl ForwardedContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };
        Self {
            host: header(X_FORWARDED_HOST),
            proto: header(X_FORWARDED_PROTO),
            uri: header(X_FORWARDED_URI),
        }
    }

    /// True when the forwarded path is `prefix` itself or lies below it.
    ///
    /// Paths with dot segments or encoded separators never match, since a
    /// later hop could resolve them to somewhere outside `prefix`.
    ///
    /// ```
    /// use codegate_auth_types::forwarded::ForwardedContext;
    ///
    /// let ctx = ForwardedContext { uri: Some("/_auth_code/verify-code".into()), ..Default::default() };
    /// assert!(ctx.is_under("/_auth_code"));
    /// let ctx = ForwardedContext { uri: Some("/_auth_codes".into()), ..Default::default() };
    /// assert!(!ctx.is_under("/_auth_code"));
    /// ```
    pub fn is_under(&self, prefix: &str) -> bool {
        let Some(uri) = self.uri.as_deref() else {
            return false;
        };
        let path = uri.split(['?', '#']).next().unwrap_or(uri);
        if path.split('/').any(is_dot_segment) || has_encoded_separator(path) {
            return false;
        }
        path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Absolute URL of the original request, used as the post-login target.
    ///
    /// `None` when the host is missing. Scheme defaults to `https`; anything
    /// other than `http`/`https` is treated as `https`. Path defaults to `/`.
    pub fn return_target(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        let proto = match self.proto.as_deref() {
            Some(p) if p.eq_ignore_ascii_case("http") => "http",
            _ => "https",
        };
        let uri = match self.uri.as_deref() {
            Some(u) if u.starts_with('/') => u,
            _ => "/",
        };
        Some(format!("{proto}://{host}{uri}"))
    }
}

/// `.` or `..`, literally or with either dot percent-encoded.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

fn has_encoded_separator(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    path.contains('\\') || lower.contains("%2f") || lower.contains("%5c")
}

impl<S> FromRequestParts<S> for ForwardedContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let context = Self::from_headers(&parts.headers);
        async move { Ok(context) }
    }
}
