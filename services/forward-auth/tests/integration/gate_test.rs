use std::time::Duration;

use codegate_auth_types::forwarded::ForwardedContext;
use codegate_forward_auth::domain::repository::SessionStore;
use codegate_forward_auth::error::GateError;
use codegate_forward_auth::infra::store::MemoryStore;
use codegate_forward_auth::usecase::gate::{GateCheckInput, GateCheckUseCase, GateDecision};

use crate::helpers::{AUTH_PREFIX, test_store};

fn forwarded(host: Option<&str>, uri: &str) -> ForwardedContext {
    ForwardedContext {
        host: host.map(str::to_owned),
        proto: Some("https".to_owned()),
        uri: Some(uri.to_owned()),
    }
}

fn check(
    store: &MemoryStore,
    ctx: &ForwardedContext,
    session_id: Option<&str>,
) -> Result<GateDecision, GateError> {
    GateCheckUseCase {
        sessions: store.clone(),
        auth_prefix: AUTH_PREFIX,
    }
    .execute(GateCheckInput {
        forwarded: ctx,
        session_id,
    })
}

#[test]
fn should_challenge_without_session() {
    let (store, _) = test_store();
    let decision = check(&store, &forwarded(Some("app.example.com"), "/admin?x=1"), None).unwrap();
    assert_eq!(
        decision,
        GateDecision::Challenge {
            return_to: "https://app.example.com/admin?x=1".to_owned()
        }
    );
}

#[test]
fn should_allow_live_session() {
    let (store, _) = test_store();
    store.issue_session("sid".into(), Duration::from_secs(60));

    let decision = check(&store, &forwarded(Some("app.example.com"), "/"), Some("sid")).unwrap();
    assert_eq!(decision, GateDecision::Allow);
}

#[test]
fn should_challenge_expired_session() {
    let (store, clock) = test_store();
    store.issue_session("sid".into(), Duration::from_secs(60));
    clock.advance(Duration::from_secs(60));

    let decision = check(&store, &forwarded(Some("app.example.com"), "/"), Some("sid")).unwrap();
    assert!(matches!(decision, GateDecision::Challenge { .. }));
}

#[test]
fn should_challenge_unknown_session() {
    let (store, _) = test_store();
    let decision = check(&store, &forwarded(Some("app.example.com"), "/"), Some("forged")).unwrap();
    assert!(matches!(decision, GateDecision::Challenge { .. }));
}

#[test]
fn should_always_allow_challenge_routes() {
    let (store, _) = test_store();
    for uri in [
        "/_auth_code",
        "/_auth_code/login?redirect_url=%2F",
        "/_auth_code/request-code",
        "/_auth_code/verify-code",
    ] {
        let decision = check(&store, &forwarded(None, uri), None).unwrap();
        assert_eq!(decision, GateDecision::Allow, "{uri}");
    }
}

#[test]
fn should_not_allow_lookalike_prefix() {
    let (store, _) = test_store();
    let decision = check(
        &store,
        &forwarded(Some("app.example.com"), "/_auth_codex/secret"),
        None,
    )
    .unwrap();
    assert!(matches!(decision, GateDecision::Challenge { .. }));
}

#[test]
fn should_challenge_dot_segment_escape_from_prefix() {
    let (store, _) = test_store();
    for uri in ["/_auth_code/../admin", "/_auth_code/%2e%2e/admin"] {
        let decision = check(&store, &forwarded(Some("app.example.com"), uri), None).unwrap();
        assert!(matches!(decision, GateDecision::Challenge { .. }), "{uri}");

        let err = check(&store, &forwarded(None, uri), None).unwrap_err();
        assert!(matches!(err, GateError::MissingForwardedHost), "{uri}");
    }
}

#[test]
fn should_fail_closed_without_forwarded_host() {
    let (store, _) = test_store();
    let err = check(&store, &forwarded(None, "/admin"), None).unwrap_err();
    assert!(matches!(err, GateError::MissingForwardedHost));
}

#[test]
fn should_allow_live_session_even_without_forwarded_host() {
    let (store, _) = test_store();
    store.issue_session("sid".into(), Duration::from_secs(60));
    let decision = check(&store, &forwarded(None, "/admin"), Some("sid")).unwrap();
    assert_eq!(decision, GateDecision::Allow);
}
