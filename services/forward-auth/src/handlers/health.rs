use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Ready once the state exists; reports raw table sizes and the active
/// notification channel.
pub async fn readyz(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ready",
        "pending_codes": state.store.pending_code_count(),
        "sessions": state.store.session_count(),
        "notifier": state.notifier.channel(),
    }))
}
