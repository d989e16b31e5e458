use std::sync::{Arc, Mutex};
use std::time::Duration;

use codegate_auth_types::cookie::SessionCookie;
use codegate_core::clock::ManualClock;

use codegate_forward_auth::domain::repository::Notifier;
use codegate_forward_auth::domain::types::ChallengePolicy;
use codegate_forward_auth::error::NotifyError;
use codegate_forward_auth::infra::notifier::{AnyNotifier, LogNotifier};
use codegate_forward_auth::infra::store::MemoryStore;
use codegate_forward_auth::state::AppState;

pub const CLIENT_IP: &str = "203.0.113.7";
pub const COOKIE_NAME: &str = "traefik_auth_code";
pub const AUTH_PREFIX: &str = "/_auth_code";

// ── Notifiers ────────────────────────────────────────────────────────────────

/// Records every delivered `(code, identity)` pair.
#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockNotifier {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for MockNotifier {
    async fn send_code(&self, code: &str, identity: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((code.to_owned(), identity.to_owned()));
        Ok(())
    }
}

/// Always fails as if the channel answered 500.
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    async fn send_code(&self, _code: &str, _identity: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Status {
            channel: "mock",
            status: 500,
        })
    }
}

/// Never completes.
pub struct HangingNotifier;

impl Notifier for HangingNotifier {
    async fn send_code(&self, _code: &str, _identity: &str) -> Result<(), NotifyError> {
        std::future::pending().await
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// Default policy with the verify delay removed.
pub fn test_policy() -> ChallengePolicy {
    ChallengePolicy {
        verify_delay: Duration::ZERO,
        ..ChallengePolicy::default()
    }
}

pub fn test_store() -> (MemoryStore, ManualClock) {
    let clock = ManualClock::starting_now();
    (MemoryStore::with_clock(Arc::new(clock.clone())), clock)
}

/// Router state over `store`, delivering through the log notifier.
pub fn test_state(store: MemoryStore) -> AppState {
    let policy = test_policy();
    AppState {
        store,
        notifier: Arc::new(AnyNotifier::Log(LogNotifier)),
        policy,
        session_cookie: Arc::new(SessionCookie::new(COOKIE_NAME, policy.session_ttl)),
        auth_prefix: Arc::from(AUTH_PREFIX),
    }
}
