use std::time::Duration;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Failure to deliver a code through a notification channel.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("{channel} request failed")]
    Transport {
        channel: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{channel} responded with status {status}")]
    Status { channel: &'static str, status: u16 },
    #[error("delivery timed out after {0:?}")]
    TimedOut(Duration),
}

/// Forward-auth service error variants.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("unauthorized (missing X-Forwarded-Host)")]
    MissingForwardedHost,
    #[error("code recently requested, retry later")]
    RateLimited { retry_after: Duration },
    #[error("failed to send notification")]
    DeliveryFailed(#[source] NotifyError),
    #[error("code expired or not requested")]
    NoActiveChallenge,
    #[error("invalid code")]
    InvalidCode,
    #[error("too many attempts")]
    TooManyAttempts,
    #[error("malformed request")]
    MalformedInput,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl GateError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingForwardedHost => "MISSING_FORWARDED_HOST",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::DeliveryFailed(_) => "DELIVERY_FAILED",
            Self::NoActiveChallenge => "NO_ACTIVE_CHALLENGE",
            Self::InvalidCode => "INVALID_CODE",
            Self::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            Self::MalformedInput => "MALFORMED_INPUT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingForwardedHost | Self::NoActiveChallenge | Self::InvalidCode => {
                StatusCode::UNAUTHORIZED
            }
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::DeliveryFailed(_) => StatusCode::BAD_GATEWAY,
            Self::TooManyAttempts => StatusCode::FORBIDDEN,
            Self::MalformedInput => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        // Only 500s are logged here; the use cases already log the expected
        // failures with the client identity attached.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        let mut resp = (self.status(), axum::Json(body)).into_response();
        if let Self::RateLimited { retry_after } = self {
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            resp.headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs.max(1)));
        }
        resp
    }
}
