use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};

use codegate_core::clock::{Clock, SystemClock, deadline_after};

use crate::domain::repository::{CodeStore, SessionStore};
use crate::domain::types::{CodeCheck, CoolingDown, PendingCode, Session, SweepReport};

struct Tables {
    codes: RwLock<HashMap<String, PendingCode>>,
    sessions: RwLock<HashMap<String, Session>>,
    clock: Arc<dyn Clock>,
}

/// In-process store for pending codes and sessions.
///
/// Cloning yields another handle onto the same tables. Each table has its own
/// lock and no operation holds both, so code traffic never blocks the gate.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Tables {
                codes: RwLock::new(HashMap::new()),
                sessions: RwLock::new(HashMap::new()),
                clock,
            }),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.inner.clock.now()
    }

    // A panic while holding a lock cannot leave a map half-updated, so a
    // poisoned lock is still safe to use.
    fn codes(&self) -> RwLockReadGuard<'_, HashMap<String, PendingCode>> {
        self.inner
            .codes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn codes_mut(&self) -> RwLockWriteGuard<'_, HashMap<String, PendingCode>> {
        self.inner
            .codes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn sessions(&self) -> RwLockReadGuard<'_, HashMap<String, Session>> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn sessions_mut(&self) -> RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop every expired code and session.
    pub fn sweep_expired(&self) -> SweepReport {
        let now = self.now();

        let codes = {
            let mut codes = self.codes_mut();
            let before = codes.len();
            codes.retain(|_, c| c.is_live_at(now));
            before - codes.len()
        };
        let sessions = {
            let mut sessions = self.sessions_mut();
            let before = sessions.len();
            sessions.retain(|_, s| s.is_live_at(now));
            before - sessions.len()
        };

        SweepReport { codes, sessions }
    }

    /// Stored codes, expired-but-unswept ones included.
    pub fn pending_code_count(&self) -> usize {
        self.codes().len()
    }

    /// Stored sessions, expired-but-unswept ones included.
    pub fn session_count(&self) -> usize {
        self.sessions().len()
    }
}

impl CodeStore for MemoryStore {
    fn issue_code(&self, identity: &str, code: String, ttl: Duration) {
        let now = self.now();
        self.codes_mut().insert(
            identity.to_owned(),
            PendingCode::new(code, now, deadline_after(now, ttl)),
        );
    }

    fn peek_code(&self, identity: &str) -> Option<PendingCode> {
        let now = self.now();
        self.codes()
            .get(identity)
            .filter(|c| c.is_live_at(now))
            .cloned()
    }

    fn record_failed_attempt(&self, identity: &str) -> Option<u32> {
        let now = self.now();
        let mut codes = self.codes_mut();
        let pending = codes.get_mut(identity).filter(|c| c.is_live_at(now))?;
        pending.attempts = pending.attempts.saturating_add(1);
        Some(pending.attempts)
    }

    fn delete_code(&self, identity: &str) {
        self.codes_mut().remove(identity);
    }

    fn issue_code_after_cooldown(
        &self,
        identity: &str,
        code: String,
        ttl: Duration,
        cooldown: Duration,
    ) -> Result<(), CoolingDown> {
        let now = self.now();
        let mut codes = self.codes_mut();

        if let Some(existing) = codes.get(identity).filter(|c| c.is_live_at(now)) {
            // A clock that stepped backwards counts as zero elapsed.
            let elapsed = (now - existing.issued_at).to_std().unwrap_or_default();
            if elapsed < cooldown {
                return Err(CoolingDown {
                    retry_after: cooldown - elapsed,
                });
            }
        }

        codes.insert(
            identity.to_owned(),
            PendingCode::new(code, now, deadline_after(now, ttl)),
        );
        Ok(())
    }

    fn attempt_code(&self, identity: &str, submitted: &str, max_attempts: u32) -> CodeCheck {
        let now = self.now();
        let mut codes = self.codes_mut();

        let Some(pending) = codes.get_mut(identity).filter(|c| c.is_live_at(now)) else {
            return CodeCheck::Missing;
        };

        if pending.code == submitted {
            codes.remove(identity);
            return CodeCheck::Matched;
        }

        pending.attempts = pending.attempts.saturating_add(1);
        let attempts = pending.attempts;
        if attempts > max_attempts {
            codes.remove(identity);
            CodeCheck::LockedOut
        } else {
            CodeCheck::Mismatch { attempts }
        }
    }
}

impl SessionStore for MemoryStore {
    fn issue_session(&self, session_id: String, ttl: Duration) -> DateTime<Utc> {
        let expires_at = deadline_after(self.now(), ttl);
        self.sessions_mut()
            .insert(session_id, Session { expires_at });
        expires_at
    }

    fn is_session_live(&self, session_id: &str) -> bool {
        let now = self.now();
        self.sessions()
            .get(session_id)
            .is_some_and(|s| s.is_live_at(now))
    }

    fn revoke_session(&self, session_id: &str) -> bool {
        self.sessions_mut().remove(session_id).is_some()
    }
}
