use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::repository::Notifier;
use crate::error::NotifyError;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const CHANNEL: &str = "telegram";

/// Delivers codes as a Telegram bot message to one chat.
pub struct TelegramNotifier {
    http_client: Client,
    api_base: String,
    bot_token: SecretString,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(http_client: Client, bot_token: SecretString, chat_id: String) -> Self {
        Self::with_api_base(http_client, TELEGRAM_API_BASE.to_owned(), bot_token, chat_id)
    }

    pub fn with_api_base(
        http_client: Client,
        api_base: String,
        bot_token: SecretString,
        chat_id: String,
    ) -> Self {
        Self {
            http_client,
            api_base: api_base.trim_end_matches('/').to_owned(),
            bot_token,
            chat_id,
        }
    }
}

impl Notifier for TelegramNotifier {
    #[tracing::instrument(name = "telegram.send_code", skip_all)]
    async fn send_code(&self, code: &str, identity: &str) -> Result<(), NotifyError> {
        // The token is part of the path; errors are stripped of the URL.
        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_base,
            self.bot_token.expose_secret()
        );
        let text = format!("🔐 Authorization Code: *{code}*\n\nRequest from IP: `{identity}`");
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text: &text,
            parse_mode: "Markdown",
        };

        let resp = self
            .http_client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Transport {
                channel: CHANNEL,
                source: e.without_url(),
            })?;

        match resp.status() {
            StatusCode::OK => Ok(()),
            status => Err(NotifyError::Status {
                channel: CHANNEL,
                status: status.as_u16(),
            }),
        }
    }
}

#[derive(Serialize, Debug)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}
