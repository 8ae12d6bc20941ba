use twostep_auth::domain::types::SessionState;
use twostep_auth::error::AuthError;
use twostep_auth::infra::memory::{MemoryCredentialStore, MemorySessionStore};
use twostep_auth::usecase::credential::{CreateCredentialInput, CreateCredentialUseCase};
use twostep_auth::usecase::login::BeginLoginInput;
use twostep_auth::usecase::session::LookupByTokenUseCase;
use twostep_domain::credential::ContactChannel;

use crate::helpers::{MockDelivery, begin_login};

fn signup(
    credentials: &MemoryCredentialStore,
    sessions: &MemorySessionStore,
) -> CreateCredentialUseCase<MemoryCredentialStore, MemorySessionStore> {
    CreateCredentialUseCase {
        credentials: credentials.clone(),
        sessions: sessions.clone(),
    }
}

fn bob() -> CreateCredentialInput {
    CreateCredentialInput {
        username: "bob".to_owned(),
        full_name: "Bob Example".to_owned(),
        phone: "+15005550007".to_owned(),
        contact_channel: ContactChannel::Voice,
        password: "hunter2pw".to_owned(),
    }
}

#[tokio::test]
async fn should_create_credential_with_immediately_usable_session() {
    let credentials = MemoryCredentialStore::new();
    let sessions = MemorySessionStore::new();

    let out = signup(&credentials, &sessions).execute(bob()).await.unwrap();

    // Signup skips the second factor: no code was ever issued.
    assert_eq!(out.session.state, SessionState::Verified);
    assert!(out.session.one_time_code.is_none());
    assert_eq!(out.credential.username, "bob");

    let lookup = LookupByTokenUseCase {
        sessions: sessions.clone(),
    };
    let resolved = lookup.execute(&out.session.token).await.unwrap().unwrap();
    assert_eq!(resolved.subject.username, "bob");
}

#[tokio::test]
async fn should_allow_login_with_created_credential() {
    let credentials = MemoryCredentialStore::new();
    let sessions = MemorySessionStore::new();
    let delivery = MockDelivery::new();

    signup(&credentials, &sessions).execute(bob()).await.unwrap();

    let out = begin_login(&credentials, &sessions, &delivery)
        .execute(BeginLoginInput {
            username: "bob".to_owned(),
            password: "hunter2pw".to_owned(),
            require_second_factor: true,
        })
        .await
        .unwrap();

    assert_eq!(out.session.state, SessionState::Pending);
    let deliveries = delivery.deliveries.lock().unwrap();
    assert_eq!(deliveries[0].channel, ContactChannel::Voice);
    assert_eq!(deliveries[0].phone, "+15005550007");
}

#[tokio::test]
async fn should_reject_duplicate_username() {
    let credentials = MemoryCredentialStore::new();
    let sessions = MemorySessionStore::new();

    let signup = signup(&credentials, &sessions);
    signup.execute(bob()).await.unwrap();
    let result = signup.execute(bob()).await;

    let err = result.unwrap_err();
    assert!(matches!(err, AuthError::UsernameTaken));
    assert_eq!(err.to_string(), "username has been taken");
}

#[tokio::test]
async fn should_report_field_level_validation_errors() {
    let credentials = MemoryCredentialStore::new();
    let sessions = MemorySessionStore::new();

    let result = signup(&credentials, &sessions)
        .execute(CreateCredentialInput {
            username: "not a name".to_owned(),
            full_name: String::new(),
            phone: "+15005550007".to_owned(),
            contact_channel: ContactChannel::Text,
            password: String::new(),
        })
        .await;

    match result {
        Err(AuthError::Validation(errors)) => {
            let fields: Vec<_> = errors.errors.iter().map(|e| e.field).collect();
            assert_eq!(fields, vec!["username", "full_name", "password"]);
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
}
