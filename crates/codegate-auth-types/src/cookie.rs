//! Cookie builders for the session token.
//!
//! The session cookie is always `HttpOnly`, `Secure`, `SameSite=Lax` and scoped
//! to `/` so it covers the whole protected zone.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Default cookie name for the session token.
pub const DEFAULT_SESSION_COOKIE: &str = "traefik_auth_code";

/// Name, scope and lifetime of the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    /// `None` keeps the cookie host-only.
    pub domain: Option<String>,
    /// Max-Age; should equal the session TTL.
    pub max_age: std::time::Duration,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, max_age: std::time::Duration) -> Self {
        Self {
            name: name.into(),
            domain: None,
            max_age,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    fn build(&self, value: String, max_age: Duration) -> Cookie<'static> {
        let mut builder = Cookie::build((self.name.clone(), value))
            .path("/")
            .max_age(max_age)
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Lax);
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        builder.build()
    }

    /// Set the session cookie on the jar.
    ///
    /// ```
    /// use std::time::Duration;
    /// use axum_extra::extract::cookie::{CookieJar, SameSite};
    /// use codegate_auth_types::cookie::SessionCookie;
    ///
    /// let settings = SessionCookie::new("gate", Duration::from_secs(86_400));
    /// let jar = settings.set(CookieJar::new(), "session_value".to_string());
    /// let cookie = jar.get("gate").unwrap();
    /// assert_eq!(cookie.value(), "session_value");
    /// assert_eq!(cookie.path(), Some("/"));
    /// assert_eq!(cookie.domain(), None);
    /// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86_400)));
    /// assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    /// assert!(cookie.http_only().unwrap_or(false));
    /// assert!(cookie.secure().unwrap_or(false));
    /// ```
    pub fn set(&self, jar: CookieJar, value: String) -> CookieJar {
        let max_age = Duration::try_from(self.max_age).unwrap_or(Duration::MAX);
        jar.add(self.build(value, max_age))
    }

    /// Clear the session cookie by setting Max-Age to 0.
    ///
    /// ```
    /// use std::time::Duration;
    /// use axum_extra::extract::cookie::CookieJar;
    /// use codegate_auth_types::cookie::SessionCookie;
    ///
    /// let settings = SessionCookie::new("gate", Duration::from_secs(60)).with_domain("example.com");
    /// let jar = settings.set(CookieJar::new(), "v".to_string());
    /// let jar = settings.clear(jar);
    /// let cookie = jar.get("gate").unwrap();
    /// assert_eq!(cookie.value(), "");
    /// assert_eq!(cookie.domain(), Some("example.com"));
    /// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    /// ```
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.build(String::new(), Duration::ZERO))
    }

    /// Session token carried by the request, if any.
    pub fn token(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.name)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty())
    }
}
