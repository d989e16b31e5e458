use std::time::Duration;

use codegate_forward_auth::domain::repository::{CodeStore, SessionStore};
use codegate_forward_auth::domain::types::ChallengePolicy;
use codegate_forward_auth::error::GateError;
use codegate_forward_auth::infra::store::MemoryStore;
use codegate_forward_auth::usecase::verify_code::{VerifyCodeInput, VerifyCodeUseCase};

use crate::helpers::{CLIENT_IP, test_policy, test_store};

const TTL: Duration = Duration::from_secs(300);

fn usecase(store: &MemoryStore) -> VerifyCodeUseCase<MemoryStore, MemoryStore> {
    VerifyCodeUseCase {
        codes: store.clone(),
        sessions: store.clone(),
        policy: test_policy(),
    }
}

async fn verify(
    uc: &VerifyCodeUseCase<MemoryStore, MemoryStore>,
    code: &str,
) -> Result<String, GateError> {
    uc.execute(VerifyCodeInput {
        identity: CLIENT_IP,
        code,
    })
    .await
    .map(|out| out.session_id)
}

#[tokio::test]
async fn should_issue_session_and_consume_code() {
    let (store, clock) = test_store();
    store.issue_code(CLIENT_IP, "123456".into(), TTL);
    let uc = usecase(&store);

    let out = uc
        .execute(VerifyCodeInput {
            identity: CLIENT_IP,
            code: "123456",
        })
        .await
        .unwrap();

    assert_eq!(out.session_id.len(), 43);
    assert!(store.is_session_live(&out.session_id));
    assert_eq!((out.expires_at - clock_now(&clock)).num_hours(), 24);
    assert_eq!(store.peek_code(CLIENT_IP), None, "code is single-use");

    // Replay of the same code finds nothing.
    let err = verify(&uc, "123456").await.unwrap_err();
    assert!(matches!(err, GateError::NoActiveChallenge));
}

fn clock_now(clock: &codegate_core::clock::ManualClock) -> chrono::DateTime<chrono::Utc> {
    use codegate_core::clock::Clock;
    clock.now()
}

#[tokio::test]
async fn should_fail_without_active_challenge() {
    let (store, _) = test_store();
    let err = verify(&usecase(&store), "123456").await.unwrap_err();
    assert!(matches!(err, GateError::NoActiveChallenge));
}

#[tokio::test]
async fn should_treat_expired_code_as_absent() {
    let (store, clock) = test_store();
    store.issue_code(CLIENT_IP, "123456".into(), TTL);
    clock.advance(TTL + Duration::from_secs(1));

    let err = verify(&usecase(&store), "123456").await.unwrap_err();
    assert!(matches!(err, GateError::NoActiveChallenge));
}

#[tokio::test]
async fn should_count_wrong_codes_then_lock_out() {
    let (store, _) = test_store();
    store.issue_code(CLIENT_IP, "123456".into(), TTL);
    let uc = usecase(&store);

    for attempt in 1..=5 {
        let err = verify(&uc, "000000").await.unwrap_err();
        assert!(
            matches!(err, GateError::InvalidCode),
            "attempt {attempt} should be a plain invalid code"
        );
        assert_eq!(store.peek_code(CLIENT_IP).unwrap().attempts, attempt);
    }

    let err = verify(&uc, "000000").await.unwrap_err();
    assert!(matches!(err, GateError::TooManyAttempts));
    assert_eq!(store.peek_code(CLIENT_IP), None, "code revoked on lockout");

    // Even the right code is useless now.
    let err = verify(&uc, "123456").await.unwrap_err();
    assert!(matches!(err, GateError::NoActiveChallenge));
}

#[tokio::test]
async fn should_accept_correct_code_after_failures_below_ceiling() {
    let (store, _) = test_store();
    store.issue_code(CLIENT_IP, "123456".into(), TTL);
    let uc = usecase(&store);

    for _ in 0..5 {
        verify(&uc, "999999").await.unwrap_err();
    }
    assert!(verify(&uc, "123456").await.is_ok());
}

#[tokio::test]
async fn should_not_coerce_leading_zeros() {
    let (store, _) = test_store();
    store.issue_code(CLIENT_IP, "004821".into(), TTL);
    let uc = VerifyCodeUseCase {
        codes: store.clone(),
        sessions: store.clone(),
        policy: ChallengePolicy {
            code_length: 6,
            ..test_policy()
        },
    };

    let err = verify(&uc, "4821").await.unwrap_err();
    assert!(matches!(err, GateError::MalformedInput));
    assert!(verify(&uc, "004821").await.is_ok());
}

#[tokio::test]
async fn should_reject_malformed_code_without_spending_an_attempt() {
    let (store, _) = test_store();
    store.issue_code(CLIENT_IP, "123456".into(), TTL);
    let uc = usecase(&store);

    for bad in ["", "12345", "1234567", "12a456", "12 456"] {
        let err = verify(&uc, bad).await.unwrap_err();
        assert!(matches!(err, GateError::MalformedInput), "{bad:?}");
    }
    assert_eq!(store.peek_code(CLIENT_IP).unwrap().attempts, 0);
}

#[tokio::test(start_paused = true)]
async fn should_delay_every_outcome() {
    let (store, _) = test_store();
    store.issue_code(CLIENT_IP, "123456".into(), TTL);
    let uc = VerifyCodeUseCase {
        codes: store.clone(),
        sessions: store.clone(),
        policy: ChallengePolicy::default(),
    };

    for code in ["000000", "abc", "123456"] {
        let started = tokio::time::Instant::now();
        let _ = verify(&uc, code).await;
        assert!(
            started.elapsed() >= Duration::from_secs(2),
            "{code:?} answered early"
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_let_one_of_concurrent_correct_submissions_win() {
    let (store, _) = test_store();
    store.issue_code(CLIENT_IP, "123456".into(), TTL);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { verify(&usecase(&store), "123456").await })
        })
        .collect();

    let mut sessions = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => sessions += 1,
            Err(GateError::NoActiveChallenge) => {}
            Err(other) => panic!("unexpected outcome {other:?}"),
        }
    }
    assert_eq!(sessions, 1);
    assert_eq!(store.session_count(), 1);
}
