//! Mock reverse-proxy headers for integration tests.
//!
//! In production the reverse proxy injects the client address and the original
//! host/scheme/path on every forward-auth call. `MockProxy` produces the same
//! headers so tests need no real proxy.

use axum::http::{HeaderMap, HeaderName, HeaderValue, header};

use codegate_auth_types::forwarded::{X_FORWARDED_HOST, X_FORWARDED_PROTO, X_FORWARDED_URI};
use codegate_auth_types::identity::X_REAL_IP;

/// Configurable forwarded context injected into test requests.
#[derive(Debug, Clone, Default)]
pub struct MockProxy {
    pub client_ip: Option<String>,
    pub host: Option<String>,
    pub proto: Option<String>,
    pub uri: Option<String>,
    pub cookie: Option<String>,
}

impl MockProxy {
    /// A client at `client_ip` requesting `https://app.example.com/`.
    pub fn new(client_ip: &str) -> Self {
        Self {
            client_ip: Some(client_ip.to_owned()),
            host: Some("app.example.com".to_owned()),
            proto: Some("https".to_owned()),
            uri: Some("/".to_owned()),
            cookie: None,
        }
    }

    pub fn uri(mut self, uri: &str) -> Self {
        self.uri = Some(uri.to_owned());
        self
    }

    pub fn without_host(mut self) -> Self {
        self.host = None;
        self
    }

    /// Send `name=value` in the `Cookie` header.
    pub fn cookie(mut self, name: &str, value: &str) -> Self {
        self.cookie = Some(format!("{name}={value}"));
        self
    }

    /// Return headers as if the reverse proxy injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let mut put = |name: &'static str, value: &Option<String>| {
            if let Some(v) = value {
                map.insert(
                    HeaderName::from_static(name),
                    HeaderValue::from_str(v).unwrap(),
                );
            }
        };
        put(X_REAL_IP, &self.client_ip);
        put(X_FORWARDED_HOST, &self.host);
        put(X_FORWARDED_PROTO, &self.proto);
        put(X_FORWARDED_URI, &self.uri);
        if let Some(cookie) = &self.cookie {
            map.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        map
    }

    /// Copy the headers onto a request builder.
    pub fn apply(&self, mut builder: axum::http::request::Builder) -> axum::http::request::Builder {
        for (name, value) in self.headers().iter() {
            builder = builder.header(name, value);
        }
        builder
    }
}
