#![allow(async_fn_in_trait)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::types::{CodeCheck, CoolingDown, PendingCode};
use crate::error::NotifyError;

/// Pending one-time codes keyed by client identity.
///
/// Every method is atomic with respect to every other. Expired entries read as
/// absent whether or not a sweep has removed them yet.
pub trait CodeStore: Send + Sync {
    /// Install a fresh code with zero attempts, replacing any existing one.
    fn issue_code(&self, identity: &str, code: String, ttl: Duration);

    /// The live code for `identity`, if any.
    fn peek_code(&self, identity: &str) -> Option<PendingCode>;

    /// Count a failed attempt against the live code. Returns the new count,
    /// or `None` (and does nothing) when there is no live code.
    fn record_failed_attempt(&self, identity: &str) -> Option<u32>;

    /// Remove the code unconditionally.
    fn delete_code(&self, identity: &str);

    /// Install a fresh code unless the live one was issued less than
    /// `cooldown` ago, in which case the existing code is left untouched.
    fn issue_code_after_cooldown(
        &self,
        identity: &str,
        code: String,
        ttl: Duration,
        cooldown: Duration,
    ) -> Result<(), CoolingDown>;

    /// Compare `submitted` against the live code in one step: consume on
    /// match, count the attempt on mismatch, revoke once attempts exceed
    /// `max_attempts`.
    fn attempt_code(&self, identity: &str, submitted: &str, max_attempts: u32) -> CodeCheck;
}

/// Authenticated sessions keyed by opaque id.
pub trait SessionStore: Send + Sync {
    /// Install a session and return its expiry.
    fn issue_session(&self, session_id: String, ttl: Duration) -> DateTime<Utc>;

    fn is_session_live(&self, session_id: &str) -> bool;

    /// Remove a session. Returns `true` if it existed.
    fn revoke_session(&self, session_id: &str) -> bool;
}

/// Out-of-band delivery channel for one-time codes.
pub trait Notifier: Send + Sync {
    async fn send_code(&self, code: &str, identity: &str) -> Result<(), NotifyError>;
}

impl<T: Notifier> Notifier for Arc<T> {
    async fn send_code(&self, code: &str, identity: &str) -> Result<(), NotifyError> {
        (**self).send_code(code, identity).await
    }
}
