use rand::RngExt;
use tracing::{info, warn};

use crate::domain::repository::{CodeStore, Notifier};
use crate::domain::types::ChallengePolicy;
use crate::error::{GateError, NotifyError};

/// Uniform random decimal digits from the thread-local CSPRNG. Leading zeros
/// are kept.
pub fn generate_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

pub struct RequestCodeInput<'a> {
    pub identity: &'a str,
}

pub struct RequestCodeUseCase<C, N>
where
    C: CodeStore,
    N: Notifier,
{
    pub codes: C,
    pub notifier: N,
    pub policy: ChallengePolicy,
}

impl<C, N> RequestCodeUseCase<C, N>
where
    C: CodeStore,
    N: Notifier,
{
    pub async fn execute(&self, input: RequestCodeInput<'_>) -> Result<(), GateError> {
        let identity = input.identity;
        let code = generate_code(self.policy.code_length);

        // 1. Install the code unless one was issued within the cooldown
        self.codes
            .issue_code_after_cooldown(
                identity,
                code.clone(),
                self.policy.code_ttl,
                self.policy.cooldown,
            )
            .map_err(|cooling| {
                info!(
                    identity,
                    retry_after = ?cooling.retry_after,
                    "code request within cooldown"
                );
                GateError::RateLimited {
                    retry_after: cooling.retry_after,
                }
            })?;
        info!(identity, "code issued");

        // 2. Deliver; on failure the code stays installed for the caller to
        //    retry after the cooldown
        let timeout = self.policy.notify_timeout;
        tokio::time::timeout(timeout, self.notifier.send_code(&code, identity))
            .await
            .unwrap_or(Err(NotifyError::TimedOut(timeout)))
            .map_err(|e| {
                warn!(identity, error = ?e, "code delivery failed");
                GateError::DeliveryFailed(e)
            })
    }
}
