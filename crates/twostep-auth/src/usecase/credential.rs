use twostep_domain::credential::{ContactChannel, Credential, validate_credential};

use crate::domain::repository::{CredentialStore, SessionRepository};
use crate::domain::types::AuthSession;
use crate::error::AuthError;

// ── CreateCredential (signup) ─────────────────────────────────────────────────

pub struct CreateCredentialInput {
    pub username: String,
    pub full_name: String,
    pub phone: String,
    pub contact_channel: ContactChannel,
    pub password: String,
}

#[derive(Debug)]
pub struct CreateCredentialOutput {
    pub credential: Credential,
    /// Session created alongside the credential. Signup skips the second
    /// factor, so it is verified and its token immediately usable.
    pub session: AuthSession,
}

pub struct CreateCredentialUseCase<C, S>
where
    C: CredentialStore,
    S: SessionRepository,
{
    pub credentials: C,
    pub sessions: S,
}

impl<C, S> CreateCredentialUseCase<C, S>
where
    C: CredentialStore,
    S: SessionRepository,
{
    pub async fn execute(
        &self,
        input: CreateCredentialInput,
    ) -> Result<CreateCredentialOutput, AuthError> {
        let credential = Credential {
            username: input.username,
            full_name: input.full_name,
            phone: input.phone,
            contact_channel: input.contact_channel,
            password: input.password,
        };
        validate_credential(&credential)?;

        self.credentials.create(&credential).await?;

        let session = AuthSession::verified(credential.clone());
        self.sessions.put(&session).await?;

        Ok(CreateCredentialOutput {
            credential,
            session,
        })
    }
}
