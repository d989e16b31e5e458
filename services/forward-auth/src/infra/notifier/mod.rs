pub mod discord;
pub mod log;
pub mod telegram;

use reqwest::Client;

use crate::config::GateConfig;
use crate::domain::repository::Notifier;
use crate::error::NotifyError;

pub use discord::DiscordNotifier;
pub use log::LogNotifier;
pub use telegram::TelegramNotifier;

/// The delivery channel chosen at startup.
pub enum AnyNotifier {
    Telegram(TelegramNotifier),
    Discord(DiscordNotifier),
    Log(LogNotifier),
}

impl AnyNotifier {
    /// Telegram when both its token and chat id are set, else Discord when a
    /// webhook is set, else the log.
    pub fn from_config(config: &GateConfig) -> Result<Self, reqwest::Error> {
        let http_client = || Client::builder().timeout(config.notify_timeout).build();

        if let (Some(token), Some(chat_id)) = (&config.telegram_bot_token, &config.telegram_chat_id)
        {
            return Ok(Self::Telegram(TelegramNotifier::new(
                http_client()?,
                token.clone(),
                chat_id.clone(),
            )));
        }
        if let Some(webhook) = &config.discord_webhook_url {
            return Ok(Self::Discord(DiscordNotifier::new(
                http_client()?,
                webhook.clone(),
            )));
        }
        Ok(Self::Log(LogNotifier))
    }

    pub fn channel(&self) -> &'static str {
        match self {
            Self::Telegram(_) => "telegram",
            Self::Discord(_) => "discord",
            Self::Log(_) => "log",
        }
    }
}

impl Notifier for AnyNotifier {
    async fn send_code(&self, code: &str, identity: &str) -> Result<(), NotifyError> {
        match self {
            Self::Telegram(n) => n.send_code(code, identity).await,
            Self::Discord(n) => n.send_code(code, identity).await,
            Self::Log(n) => n.send_code(code, identity).await,
        }
    }
}
