use codegate_auth_types::forwarded::ForwardedContext;

use crate::domain::repository::SessionStore;
use crate::error::GateError;

/// Outcome of a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the proxy forward the original request.
    Allow,
    /// Send the caller through the challenge, then back to `return_to`.
    Challenge { return_to: String },
}

pub struct GateCheckInput<'a> {
    pub forwarded: &'a ForwardedContext,
    pub session_id: Option<&'a str>,
}

pub struct GateCheckUseCase<'a, S>
where
    S: SessionStore,
{
    pub sessions: S,
    pub auth_prefix: &'a str,
}

impl<S> GateCheckUseCase<'_, S>
where
    S: SessionStore,
{
    pub fn execute(&self, input: GateCheckInput<'_>) -> Result<GateDecision, GateError> {
        // The challenge routes themselves are always reachable.
        if input.forwarded.is_under(self.auth_prefix) {
            return Ok(GateDecision::Allow);
        }

        if input
            .session_id
            .is_some_and(|sid| self.sessions.is_session_live(sid))
        {
            return Ok(GateDecision::Allow);
        }

        let return_to = input
            .forwarded
            .return_target()
            .ok_or(GateError::MissingForwardedHost)?;
        Ok(GateDecision::Challenge { return_to })
    }
}
