use chrono::{Duration, Utc};

use twostep_auth::domain::repository::SessionRepository;
use twostep_auth::domain::types::{AuthSession, PENDING_SESSION_TTL_SECS, SessionState};
use twostep_auth::error::AuthError;
use twostep_auth::infra::memory::MemorySessionStore;
use twostep_auth::usecase::code::VerifyCodeInput;
use twostep_auth::usecase::login::BeginLoginInput;
use twostep_auth::usecase::session::LookupByTokenUseCase;

use crate::helpers::{MockDelivery, alice, begin_login, resend_code, seeded_credentials, verify_code};

async fn pending_session(
    sessions: &MemorySessionStore,
    delivery: &MockDelivery,
) -> AuthSession {
    let credentials = seeded_credentials().await;
    begin_login(&credentials, sessions, delivery)
        .execute(BeginLoginInput {
            username: "alice".to_owned(),
            password: "correct-pw".to_owned(),
            require_second_factor: true,
        })
        .await
        .unwrap()
        .session
}

#[tokio::test]
async fn should_promote_session_on_correct_code() {
    let sessions = MemorySessionStore::new();
    let delivery = MockDelivery::new();
    let session = pending_session(&sessions, &delivery).await;

    let verified = verify_code(&sessions)
        .execute(VerifyCodeInput {
            session_id: session.id.clone(),
            code: delivery.last_code(),
        })
        .await
        .unwrap();

    assert_eq!(verified.state, SessionState::Verified);
    assert!(verified.one_time_code.is_none());
    assert_eq!(verified.token, session.token);

    // The promoted token now resolves to the subject.
    let lookup = LookupByTokenUseCase {
        sessions: sessions.clone(),
    };
    let resolved = lookup.execute(&session.token).await.unwrap().unwrap();
    assert_eq!(resolved.subject.username, alice().username);
}

#[tokio::test]
async fn should_reject_wrong_code_and_leave_session_pending() {
    let sessions = MemorySessionStore::new();
    let delivery = MockDelivery::new();
    let session = pending_session(&sessions, &delivery).await;

    let result = verify_code(&sessions)
        .execute(VerifyCodeInput {
            session_id: session.id.clone(),
            code: "000000".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::CodeMismatch)));

    // The session is untouched: the real code still verifies.
    let verified = verify_code(&sessions)
        .execute(VerifyCodeInput {
            session_id: session.id.clone(),
            code: delivery.last_code(),
        })
        .await
        .unwrap();
    assert_eq!(verified.state, SessionState::Verified);
}

#[tokio::test]
async fn should_report_unknown_session_distinctly_from_wrong_code() {
    let sessions = MemorySessionStore::new();

    let result = verify_code(&sessions)
        .execute(VerifyCodeInput {
            session_id: "unknown-id".to_owned(),
            code: "000000".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::SessionNotFound)));
}

#[tokio::test]
async fn should_trim_surrounding_whitespace_from_submitted_code() {
    let sessions = MemorySessionStore::new();
    let delivery = MockDelivery::new();
    let session = pending_session(&sessions, &delivery).await;

    let verified = verify_code(&sessions)
        .execute(VerifyCodeInput {
            session_id: session.id.clone(),
            code: format!("  {}\n", delivery.last_code()),
        })
        .await
        .unwrap();

    assert_eq!(verified.state, SessionState::Verified);
}

#[tokio::test]
async fn should_succeed_idempotently_on_already_verified_session() {
    let sessions = MemorySessionStore::new();
    let delivery = MockDelivery::new();
    let session = pending_session(&sessions, &delivery).await;
    let code = delivery.last_code();

    let first = verify_code(&sessions)
        .execute(VerifyCodeInput {
            session_id: session.id.clone(),
            code: code.clone(),
        })
        .await
        .unwrap();

    // Re-submitting the same (now consumed) code is a no-op success.
    let second = verify_code(&sessions)
        .execute(VerifyCodeInput {
            session_id: session.id.clone(),
            code,
        })
        .await
        .unwrap();

    assert_eq!(first.state, SessionState::Verified);
    assert_eq!(second.state, SessionState::Verified);
    assert_eq!(second.token, first.token);
}

#[tokio::test]
async fn should_invalidate_stale_code_once_resend_overwrites_it() {
    let sessions = MemorySessionStore::new();
    let delivery = MockDelivery::new();
    let mut session = pending_session(&sessions, &delivery).await;

    // Plant a sentinel as the stored code (TOTP codes are all digits, so it
    // can never collide with a regenerated value), then resend.
    session.one_time_code = Some("stale-code".to_owned());
    sessions.put(&session).await.unwrap();

    let resent = resend_code(&sessions, &delivery)
        .execute(&session.id)
        .await
        .unwrap();
    assert!(resent.success);

    let result = verify_code(&sessions)
        .execute(VerifyCodeInput {
            session_id: session.id.clone(),
            code: "stale-code".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::CodeMismatch)));

    let verified = verify_code(&sessions)
        .execute(VerifyCodeInput {
            session_id: session.id.clone(),
            code: delivery.last_code(),
        })
        .await
        .unwrap();
    assert_eq!(verified.state, SessionState::Verified);
}

#[tokio::test]
async fn should_treat_expired_pending_session_as_not_found() {
    let sessions = MemorySessionStore::new();
    let mut session = AuthSession::pending(alice());
    session.one_time_code = Some("123456".to_owned());
    session.created_at = Utc::now() - Duration::seconds(PENDING_SESSION_TTL_SECS + 1);
    sessions.put(&session).await.unwrap();

    let result = verify_code(&sessions)
        .execute(VerifyCodeInput {
            session_id: session.id.clone(),
            code: "123456".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::SessionNotFound)));
}
