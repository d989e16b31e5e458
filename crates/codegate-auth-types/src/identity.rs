//! Client identity extractor.

use std::fmt;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use http::request::Parts;
use http::{HeaderMap, StatusCode};

pub const X_REAL_IP: &str = "x-real-ip";
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// The key pending-code state is stored under: the caller's address as seen
/// through the trusted proxy.
///
/// Resolution order: `x-real-ip`, first entry of `x-forwarded-for`, then the
/// peer socket address. Returns 400 if none is available.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<Self> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        if let Some(real_ip) = header(X_REAL_IP) {
            return Some(Self::new(real_ip));
        }
        if let Some(first) = header(X_FORWARDED_FOR)
            .and_then(|xff| xff.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return Some(Self::new(first));
        }
        peer.map(|addr| Self::new(addr.ip().to_string()))
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for ClientIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Extract synchronously and return a 'static future; `async fn` here trips
    // E0195 with axum-core 0.5's signature under precise capturing.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0);
        let identity = Self::resolve(&parts.headers, peer);

        async move { identity.ok_or(StatusCode::BAD_REQUEST) }
    }
}
