use std::time::Duration;

use secrecy::SecretString;
use tracing::warn;

use codegate_auth_types::cookie::{DEFAULT_SESSION_COOKIE, SessionCookie};
use codegate_core::config::{EnvSource, ProcessEnv, duration_or, optional, parse_or, string_or};

use crate::domain::types::{
    CODE_LENGTH_RANGE, ChallengePolicy, DEFAULT_AUTH_PATH_PREFIX, DEFAULT_CODE_COOLDOWN,
    DEFAULT_CODE_LENGTH, DEFAULT_CODE_TTL, DEFAULT_MAX_ATTEMPTS, DEFAULT_NOTIFY_TIMEOUT,
    DEFAULT_SESSION_TTL, DEFAULT_SWEEP_INTERVAL, DEFAULT_VERIFY_DELAY,
};

/// Forward-auth configuration loaded from environment variables.
///
/// Missing values take their defaults; invalid values log a warning and take
/// their defaults too, so loading never fails.
#[derive(Debug)]
pub struct GateConfig {
    /// TCP port to listen on (default 8080). Env var: `PORT`.
    pub port: u16,
    /// Env var: `TELEGRAM_BOT_TOKEN`.
    pub telegram_bot_token: Option<SecretString>,
    /// Env var: `TELEGRAM_CHAT_ID`.
    pub telegram_chat_id: Option<String>,
    /// Env var: `DISCORD_WEBHOOK_URL`.
    pub discord_webhook_url: Option<SecretString>,
    /// Env var: `CODE_EXPIRATION` (default 5m).
    pub code_expiration: Duration,
    /// Env var: `SESSION_DURATION` (default 24h).
    pub session_duration: Duration,
    /// Env var: `CODE_LENGTH` (default 6, accepted 4..=12).
    pub code_length: usize,
    /// Env var: `CODE_COOLDOWN` (default 30s).
    pub code_cooldown: Duration,
    /// Env var: `MAX_ATTEMPTS` (default 5).
    pub max_attempts: u32,
    /// Env var: `VERIFY_DELAY` (default 2s).
    pub verify_delay: Duration,
    /// Env var: `NOTIFY_TIMEOUT` (default 10s).
    pub notify_timeout: Duration,
    /// Env var: `SWEEP_INTERVAL` (default 1m, must be non-zero).
    pub sweep_interval: Duration,
    /// Env var: `COOKIE_NAME` (default `traefik_auth_code`).
    pub cookie_name: String,
    /// Env var: `COOKIE_DOMAIN` (default host-only).
    pub cookie_domain: Option<String>,
    /// Env var: `AUTH_PATH_PREFIX` (default `/_auth_code`).
    pub auth_path_prefix: String,
}

impl GateConfig {
    pub fn from_env() -> Self {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(env: &impl EnvSource) -> Self {
        let code_length = parse_or(env, "CODE_LENGTH", DEFAULT_CODE_LENGTH);
        let code_length = if CODE_LENGTH_RANGE.contains(&code_length) {
            code_length
        } else {
            warn!(
                code_length,
                fallback = DEFAULT_CODE_LENGTH,
                "CODE_LENGTH out of range, using fallback"
            );
            DEFAULT_CODE_LENGTH
        };

        let sweep_interval = match duration_or(env, "SWEEP_INTERVAL", DEFAULT_SWEEP_INTERVAL) {
            d if d.is_zero() => {
                warn!("SWEEP_INTERVAL must be non-zero, using fallback");
                DEFAULT_SWEEP_INTERVAL
            }
            d => d,
        };

        Self {
            port: parse_or(env, "PORT", 8080),
            telegram_bot_token: optional(env, "TELEGRAM_BOT_TOKEN").map(SecretString::from),
            telegram_chat_id: optional(env, "TELEGRAM_CHAT_ID"),
            discord_webhook_url: optional(env, "DISCORD_WEBHOOK_URL").map(SecretString::from),
            code_expiration: duration_or(env, "CODE_EXPIRATION", DEFAULT_CODE_TTL),
            session_duration: duration_or(env, "SESSION_DURATION", DEFAULT_SESSION_TTL),
            code_length,
            code_cooldown: duration_or(env, "CODE_COOLDOWN", DEFAULT_CODE_COOLDOWN),
            max_attempts: parse_or(env, "MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            verify_delay: duration_or(env, "VERIFY_DELAY", DEFAULT_VERIFY_DELAY),
            notify_timeout: duration_or(env, "NOTIFY_TIMEOUT", DEFAULT_NOTIFY_TIMEOUT),
            sweep_interval,
            cookie_name: string_or(env, "COOKIE_NAME", DEFAULT_SESSION_COOKIE),
            cookie_domain: optional(env, "COOKIE_DOMAIN"),
            auth_path_prefix: normalize_prefix(&string_or(
                env,
                "AUTH_PATH_PREFIX",
                DEFAULT_AUTH_PATH_PREFIX,
            )),
        }
    }

    pub fn policy(&self) -> ChallengePolicy {
        ChallengePolicy {
            code_length: self.code_length,
            code_ttl: self.code_expiration,
            cooldown: self.code_cooldown,
            max_attempts: self.max_attempts,
            verify_delay: self.verify_delay,
            notify_timeout: self.notify_timeout,
            session_ttl: self.session_duration,
        }
    }

    pub fn session_cookie(&self) -> SessionCookie {
        let cookie = SessionCookie::new(self.cookie_name.clone(), self.session_duration);
        match &self.cookie_domain {
            Some(domain) => cookie.with_domain(domain.clone()),
            None => cookie,
        }
    }

    /// Non-fatal configuration gaps worth telling the operator about.
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        let telegram_ready = self.telegram_bot_token.is_some() && self.telegram_chat_id.is_some();
        if !telegram_ready && self.discord_webhook_url.is_none() {
            out.push(
                "no notification channel configured (Telegram or Discord); codes will only be logged",
            );
        }
        if self.telegram_bot_token.is_some() && self.telegram_chat_id.is_none() {
            out.push("TELEGRAM_BOT_TOKEN set but TELEGRAM_CHAT_ID missing");
        }
        out
    }

    pub fn log_warnings(&self) {
        for w in self.warnings() {
            warn!("{w}");
        }
    }
}

/// Leading slash, no trailing slash, never the root.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        warn!(value = raw, "AUTH_PATH_PREFIX cannot be the root, using fallback");
        return DEFAULT_AUTH_PATH_PREFIX.to_owned();
    }
    format!("/{trimmed}")
}
