use tracing::info;

use crate::domain::repository::Notifier;
use crate::error::NotifyError;

/// Writes codes to the service log. Used when no delivery channel is
/// configured; anyone with log access can authenticate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn send_code(&self, code: &str, identity: &str) -> Result<(), NotifyError> {
        info!(code, identity, "authorization code (no notifier configured)");
        Ok(())
    }
}
