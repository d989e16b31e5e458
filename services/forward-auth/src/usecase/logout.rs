use tracing::info;

use crate::domain::repository::SessionStore;

pub struct RevokeSessionUseCase<S>
where
    S: SessionStore,
{
    pub sessions: S,
}

impl<S> RevokeSessionUseCase<S>
where
    S: SessionStore,
{
    /// Revoke the session if there is one. Returns whether anything was
    /// revoked; callers treat both outcomes as success.
    pub fn execute(&self, session_id: Option<&str>) -> bool {
        let revoked = session_id.is_some_and(|sid| self.sessions.revoke_session(sid));
        if revoked {
            info!("session revoked");
        }
        revoked
    }
}
