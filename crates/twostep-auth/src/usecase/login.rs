use std::time::Duration;

use crate::domain::repository::{CodeDelivery, CredentialVerifier, SessionRepository};
use crate::domain::types::{AuthSession, CODE_DELIVERY_TIMEOUT_SECS};
use crate::error::AuthError;
use crate::otp::CodeGenerator;

// ── BeginLogin (first factor) ─────────────────────────────────────────────────

pub struct BeginLoginInput {
    pub username: String,
    pub password: String,
    /// When false (e.g. right after signup) the session is verified at
    /// creation and no code is issued.
    pub require_second_factor: bool,
}

#[derive(Debug)]
pub struct BeginLoginOutput {
    pub session: AuthSession,
    /// `Some(reason)` when the one-time code could not be delivered. The
    /// session is persisted either way; the caller retries via resend.
    pub delivery_error: Option<String>,
}

pub struct BeginLoginUseCase<V, S, D>
where
    V: CredentialVerifier,
    S: SessionRepository,
    D: CodeDelivery,
{
    pub credentials: V,
    pub sessions: S,
    pub delivery: D,
    pub codes: CodeGenerator,
}

impl<V, S, D> BeginLoginUseCase<V, S, D>
where
    V: CredentialVerifier,
    S: SessionRepository,
    D: CodeDelivery,
{
    pub async fn execute(&self, input: BeginLoginInput) -> Result<BeginLoginOutput, AuthError> {
        // 1. First factor: username/password against the external store.
        let credential = self
            .credentials
            .verify_credentials(&input.username, &input.password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // 2. Flows that skip the second factor promote immediately.
        if !input.require_second_factor {
            let session = AuthSession::verified(credential);
            self.sessions.put(&session).await?;
            return Ok(BeginLoginOutput {
                session,
                delivery_error: None,
            });
        }

        // 3. Pending session + code issuance. A delivery failure is a soft
        //    outcome: the session stays persisted for resend.
        let mut session = AuthSession::pending(credential);
        match issue_one_time_code(&self.sessions, &self.delivery, &self.codes, &mut session).await {
            Ok(()) => Ok(BeginLoginOutput {
                session,
                delivery_error: None,
            }),
            Err(AuthError::Delivery { reason }) => {
                tracing::warn!(
                    session_id = %session.id,
                    reason = %reason,
                    "one-time code delivery failed at login"
                );
                Ok(BeginLoginOutput {
                    session,
                    delivery_error: Some(reason),
                })
            }
            Err(e) => Err(e),
        }
    }
}

// ── Code issuance (shared with resend) ────────────────────────────────────────

/// Generate a fresh one-time code for the current time window, overwrite the
/// session's stored code, persist, then deliver. The persist happens before
/// the delivery call so a delivery failure or timeout leaves a retrievable
/// pending session holding the new code.
pub(crate) async fn issue_one_time_code<S, D>(
    sessions: &S,
    delivery: &D,
    codes: &CodeGenerator,
    session: &mut AuthSession,
) -> Result<(), AuthError>
where
    S: SessionRepository,
    D: CodeDelivery,
{
    let code = codes.current_code()?;
    session.one_time_code = Some(code.clone());
    sessions.put(session).await?;

    let attempt = delivery.deliver(
        &code,
        session.subject.contact_channel,
        &session.subject.phone,
    );
    match tokio::time::timeout(Duration::from_secs(CODE_DELIVERY_TIMEOUT_SECS), attempt).await {
        Ok(result) => result,
        Err(_) => Err(AuthError::Delivery {
            reason: "code delivery timed out".to_owned(),
        }),
    }
}
