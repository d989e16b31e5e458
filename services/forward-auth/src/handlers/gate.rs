use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;

use codegate_auth_types::forwarded::ForwardedContext;

use crate::error::GateError;
use crate::state::AppState;
use crate::templates::ChallengePage;
use crate::usecase::gate::{GateCheckInput, GateCheckUseCase, GateDecision};

/// Forward-auth entry point: every path not claimed by another route lands
/// here. 200 lets the proxy forward the request; 401 carries the challenge
/// page back to the browser.
pub async fn check_gate(
    State(state): State<AppState>,
    forwarded: ForwardedContext,
    jar: CookieJar,
) -> Result<Response, GateError> {
    let session_id = state.session_cookie.token(&jar);
    let usecase = GateCheckUseCase {
        sessions: state.session_store(),
        auth_prefix: &state.auth_prefix,
    };
    let decision = usecase.execute(GateCheckInput {
        forwarded: &forwarded,
        session_id: session_id.as_deref(),
    })?;

    match decision {
        GateDecision::Allow => Ok(StatusCode::OK.into_response()),
        GateDecision::Challenge { return_to } => {
            let page = render_challenge(&state, &return_to)?;
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
    }
}

pub(crate) fn render_challenge(
    state: &AppState,
    return_to: &str,
) -> Result<Html<String>, GateError> {
    let page = ChallengePage {
        auth_prefix: &state.auth_prefix,
        return_to,
        code_length: state.policy.code_length,
    };
    let html = page
        .render()
        .map_err(|e| GateError::Internal(anyhow::Error::new(e)))?;
    Ok(Html(html))
}
