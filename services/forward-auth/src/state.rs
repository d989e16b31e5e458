use std::sync::Arc;

use codegate_auth_types::cookie::SessionCookie;

use crate::domain::types::ChallengePolicy;
use crate::infra::notifier::AnyNotifier;
use crate::infra::store::MemoryStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: MemoryStore,
    pub notifier: Arc<AnyNotifier>,
    pub policy: ChallengePolicy,
    pub session_cookie: Arc<SessionCookie>,
    pub auth_prefix: Arc<str>,
}

impl AppState {
    pub fn code_store(&self) -> MemoryStore {
        self.store.clone()
    }

    pub fn session_store(&self) -> MemoryStore {
        self.store.clone()
    }

    pub fn notifier(&self) -> Arc<AnyNotifier> {
        Arc::clone(&self.notifier)
    }
}
