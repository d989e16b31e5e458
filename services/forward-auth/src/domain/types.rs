use std::time::Duration;

use chrono::{DateTime, Utc};

/// One-time code awaiting verification for a single client identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCode {
    pub code: String,
    pub issued_at: DateTime<Utc>,
    /// The code is unusable at or after this instant.
    pub expires_at: DateTime<Utc>,
    /// Failed verification attempts since issuance.
    pub attempts: u32,
}

impl PendingCode {
    pub fn new(code: String, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            code,
            issued_at,
            expires_at,
            attempts: 0,
        }
    }

    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Authenticated session, keyed by its opaque id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Result of atomically checking a submitted code against the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    /// Code matched and was consumed.
    Matched,
    /// Wrong code; `attempts` is the count after this failure.
    Mismatch { attempts: u32 },
    /// Wrong code pushed attempts past the ceiling; the code was revoked.
    LockedOut,
    /// No live code for this identity.
    Missing,
}

/// A code was issued too recently to issue another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoolingDown {
    pub retry_after: Duration,
}

/// Entries removed by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub codes: usize,
    pub sessions: usize,
}

/// Tunables for the challenge flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengePolicy {
    /// Digits per code.
    pub code_length: usize,
    pub code_ttl: Duration,
    /// Minimum time between two code issuances for one identity.
    pub cooldown: Duration,
    /// Wrong submissions tolerated; the next one revokes the code.
    pub max_attempts: u32,
    /// Minimum latency of every verification.
    pub verify_delay: Duration,
    /// Upper bound on a single notifier call.
    pub notify_timeout: Duration,
    pub session_ttl: Duration,
}

impl Default for ChallengePolicy {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            code_ttl: DEFAULT_CODE_TTL,
            cooldown: DEFAULT_CODE_COOLDOWN,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            verify_delay: DEFAULT_VERIFY_DELAY,
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

/// Code length in digits.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Accepted range for a configured code length.
pub const CODE_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 4..=12;

/// Code time-to-live (5 minutes).
pub const DEFAULT_CODE_TTL: Duration = Duration::from_secs(300);

pub const DEFAULT_CODE_COOLDOWN: Duration = Duration::from_secs(30);

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

pub const DEFAULT_VERIFY_DELAY: Duration = Duration::from_secs(2);

pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Session time-to-live (24 hours).
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(86_400);

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Mount point of the challenge routes.
pub const DEFAULT_AUTH_PATH_PREFIX: &str = "/_auth_code";
