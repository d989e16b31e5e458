use chrono::{DateTime, Utc};
use tracing::{info, warn};

use codegate_auth_types::session::generate_session_id;

use crate::domain::repository::{CodeStore, SessionStore};
use crate::domain::types::{ChallengePolicy, CodeCheck};
use crate::error::GateError;

pub struct VerifyCodeInput<'a> {
    pub identity: &'a str,
    pub code: &'a str,
}

/// A freshly issued session, for the caller to persist as a cookie.
#[derive(Debug)]
pub struct VerifyCodeOutput {
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

pub struct VerifyCodeUseCase<C, S>
where
    C: CodeStore,
    S: SessionStore,
{
    pub codes: C,
    pub sessions: S,
    pub policy: ChallengePolicy,
}

impl<C, S> VerifyCodeUseCase<C, S>
where
    C: CodeStore,
    S: SessionStore,
{
    pub async fn execute(
        &self,
        input: VerifyCodeInput<'_>,
    ) -> Result<VerifyCodeOutput, GateError> {
        let identity = input.identity;

        // 1. Every outcome waits the same minimum time
        tokio::time::sleep(self.policy.verify_delay).await;

        // 2. Reject anything that could never match before it costs an attempt
        if !is_well_formed(input.code, self.policy.code_length) {
            return Err(GateError::MalformedInput);
        }

        // 3. Check and consume in one store step
        match self
            .codes
            .attempt_code(identity, input.code, self.policy.max_attempts)
        {
            CodeCheck::Matched => {}
            CodeCheck::Missing => return Err(GateError::NoActiveChallenge),
            CodeCheck::Mismatch { attempts } => {
                warn!(identity, attempts, "invalid code");
                return Err(GateError::InvalidCode);
            }
            CodeCheck::LockedOut => {
                warn!(identity, "too many attempts, code revoked");
                return Err(GateError::TooManyAttempts);
            }
        }

        // 4. Promote to a session
        let session_id = generate_session_id();
        let expires_at = self
            .sessions
            .issue_session(session_id.clone(), self.policy.session_ttl);
        info!(identity, %expires_at, "session issued");

        Ok(VerifyCodeOutput {
            session_id,
            expires_at,
        })
    }
}

fn is_well_formed(code: &str, len: usize) -> bool {
    code.len() == len && code.bytes().all(|b| b.is_ascii_digit())
}
