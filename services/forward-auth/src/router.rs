use axum::{
    Router,
    routing::{get, post},
};

use codegate_core::middleware::with_observability;

use crate::handlers::{
    challenge::{login_page, logout, request_code, verify_code},
    gate::check_gate,
    health::{healthz, readyz},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let challenge = Router::new()
        .route("/login", get(login_page))
        .route("/request-code", post(request_code))
        .route("/verify-code", post(verify_code))
        .route("/logout", post(logout));

    let prefix = state.auth_prefix.clone();
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Challenge flow
        .nest(&prefix, challenge)
        // Everything else is a forward-auth check
        .fallback(check_gate)
        .with_state(state);

    with_observability(router)
}
