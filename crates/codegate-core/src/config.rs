//! Helpers for loading service configuration from environment variables.
//!
//! Values that are present but unparseable log a warning and fall back to the
//! default instead of aborting startup.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Source of raw configuration values keyed by variable name.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Errors returned by [`parse_duration`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DurationParseError {
    #[error("empty duration")]
    Empty,
    #[error("invalid number in duration: {0:?}")]
    InvalidNumber(String),
    #[error("missing unit after {0}")]
    MissingUnit(u64),
    #[error("unknown duration unit: {0:?}")]
    UnknownUnit(String),
}

/// Parse a duration such as `90`, `500ms`, `30s`, `5m`, `24h`, `7d` or `1h30m`.
///
/// A bare integer is read as seconds. Overflow saturates.
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DurationParseError::Empty);
    }
    if let Ok(secs) = input.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = input;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            return Err(DurationParseError::InvalidNumber(rest.to_owned()));
        }
        let value: u64 = rest[..digits]
            .parse()
            .map_err(|_| DurationParseError::InvalidNumber(rest[..digits].to_owned()))?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        let step = match unit {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.saturating_mul(60)),
            "h" => Duration::from_secs(value.saturating_mul(3_600)),
            "d" => Duration::from_secs(value.saturating_mul(86_400)),
            "" => return Err(DurationParseError::MissingUnit(value)),
            other => return Err(DurationParseError::UnknownUnit(other.to_owned())),
        };
        total = total.saturating_add(step);
    }
    Ok(total)
}

/// Trimmed, non-empty value of `key`.
pub fn optional(env: &impl EnvSource, key: &str) -> Option<String> {
    env.get(key)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

pub fn string_or(env: &impl EnvSource, key: &str, default: &str) -> String {
    optional(env, key).unwrap_or_else(|| default.to_owned())
}

/// Parse `key` with [`FromStr`], falling back to `default` when unset or invalid.
pub fn parse_or<T>(env: &impl EnvSource, key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match optional(env, key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            ::tracing::warn!(key, value = %raw, fallback = %default, "invalid value, using fallback");
            default
        }),
        None => default,
    }
}

/// Parse `key` with [`parse_duration`], falling back to `default` when unset or invalid.
pub fn duration_or(env: &impl EnvSource, key: &str, default: Duration) -> Duration {
    match optional(env, key) {
        Some(raw) => parse_duration(&raw).unwrap_or_else(|e| {
            ::tracing::warn!(key, value = %raw, error = %e, fallback = ?default, "invalid duration, using fallback");
            default
        }),
        None => default,
    }
}
