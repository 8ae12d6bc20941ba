#![allow(async_fn_in_trait)]

use twostep_domain::credential::{ContactChannel, Credential};

use crate::domain::types::AuthSession;
use crate::error::AuthError;

/// Port for checking a username/password pair against the external
/// credential store. `None` means no match. May incur real round-trip
/// latency; callers await it without holding any store lock.
pub trait CredentialVerifier: Send + Sync {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Credential>, AuthError>;
}

/// Port for registering new credentials.
pub trait CredentialStore: Send + Sync {
    /// Insert a credential. Fails with `UsernameTaken` when the username is
    /// already registered.
    async fn create(&self, credential: &Credential) -> Result<(), AuthError>;
}

/// Repository for authentication sessions. A session record is replaced
/// whole by `put`; fetched records are copies and changes are only visible
/// after an explicit `put`.
pub trait SessionRepository: Send + Sync {
    /// Upsert keyed by session id.
    async fn put(&self, session: &AuthSession) -> Result<(), AuthError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<AuthSession>, AuthError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<AuthSession>, AuthError>;

    /// Delete by token. Idempotent; a missing token is not an error.
    async fn delete_by_token(&self, token: &str) -> Result<(), AuthError>;
}

/// Port for pushing a one-time code to a user's phone channel. For voice
/// delivery the provider renders the digits into a spoken prompt; the core
/// only supplies the digit string and channel selection.
pub trait CodeDelivery: Send + Sync {
    async fn deliver(
        &self,
        code: &str,
        channel: ContactChannel,
        phone: &str,
    ) -> Result<(), AuthError>;
}
