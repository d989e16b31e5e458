use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::repository::Notifier;
use crate::error::NotifyError;

const CHANNEL: &str = "discord";

/// Delivers codes to a Discord channel webhook.
pub struct DiscordNotifier {
    http_client: Client,
    webhook_url: SecretString,
}

impl DiscordNotifier {
    pub fn new(http_client: Client, webhook_url: SecretString) -> Self {
        Self {
            http_client,
            webhook_url,
        }
    }
}

impl Notifier for DiscordNotifier {
    #[tracing::instrument(name = "discord.send_code", skip_all)]
    async fn send_code(&self, code: &str, identity: &str) -> Result<(), NotifyError> {
        let content = format!("🔐 **Authorization Code**: `{code}`\nRequest from IP: `{identity}`");

        let resp = self
            .http_client
            .post(self.webhook_url.expose_secret())
            .json(&WebhookMessage { content: &content })
            .send()
            .await
            .map_err(|e| NotifyError::Transport {
                channel: CHANNEL,
                source: e.without_url(),
            })?;

        match resp.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            status => Err(NotifyError::Status {
                channel: CHANNEL,
                status: status.as_u16(),
            }),
        }
    }
}

#[derive(Serialize, Debug)]
struct WebhookMessage<'a> {
    content: &'a str,
}
