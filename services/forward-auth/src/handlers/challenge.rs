use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{Value, json};

use codegate_auth_types::identity::ClientIdentity;

use crate::error::GateError;
use crate::handlers::gate::render_challenge;
use crate::state::AppState;
use crate::usecase::logout::RevokeSessionUseCase;
use crate::usecase::request_code::{RequestCodeInput, RequestCodeUseCase};
use crate::usecase::verify_code::{VerifyCodeInput, VerifyCodeUseCase};

#[derive(Deserialize)]
pub struct LoginQuery {
    pub redirect_url: Option<String>,
}

/// Direct entry to the challenge page, for when the browser is not arriving
/// through a gated request.
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Html<String>, GateError> {
    let return_to = query.redirect_url.as_deref().unwrap_or("/");
    render_challenge(&state, return_to)
}

pub async fn request_code(
    State(state): State<AppState>,
    identity: ClientIdentity,
) -> Result<Json<Value>, GateError> {
    let usecase = RequestCodeUseCase {
        codes: state.code_store(),
        notifier: state.notifier(),
        policy: state.policy,
    };
    usecase
        .execute(RequestCodeInput {
            identity: identity.as_str(),
        })
        .await?;
    Ok(Json(json!({ "message": "Code sent" })))
}

#[derive(Deserialize)]
pub struct VerifyCodeRequest {
    pub code: String,
}

pub async fn verify_code(
    State(state): State<AppState>,
    identity: ClientIdentity,
    jar: CookieJar,
    body: Result<Json<VerifyCodeRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<Value>), GateError> {
    // An unreadable body still pays the verify delay; the empty code is then
    // rejected as malformed.
    let code = body.map(|Json(b)| b.code).unwrap_or_default();

    let usecase = VerifyCodeUseCase {
        codes: state.code_store(),
        sessions: state.session_store(),
        policy: state.policy,
    };
    let output = usecase
        .execute(VerifyCodeInput {
            identity: identity.as_str(),
            code: &code,
        })
        .await?;

    let jar = state.session_cookie.set(jar, output.session_id);
    Ok((jar, Json(json!({ "message": "Authenticated" }))))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let session_id = state.session_cookie.token(&jar);
    let usecase = RevokeSessionUseCase {
        sessions: state.session_store(),
    };
    usecase.execute(session_id.as_deref());
    (state.session_cookie.clear(jar), StatusCode::NO_CONTENT)
}
