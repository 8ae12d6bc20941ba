use crate::domain::repository::{CodeDelivery, SessionRepository};
use crate::domain::types::{AuthSession, SessionState};
use crate::error::AuthError;
use crate::otp::CodeGenerator;
use crate::usecase::login::issue_one_time_code;

// ── VerifyCode (second factor) ────────────────────────────────────────────────

pub struct VerifyCodeInput {
    pub session_id: String,
    pub code: String,
}

pub struct VerifyCodeUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> VerifyCodeUseCase<S> {
    /// Check a submitted code against the session's current expected code.
    /// The submitted value is trimmed of surrounding whitespace and compared
    /// by exact string equality; codes are fixed-width digit strings, so
    /// leading zeros are significant.
    pub async fn execute(&self, input: VerifyCodeInput) -> Result<AuthSession, AuthError> {
        let session = self
            .sessions
            .find_by_id(&input.session_id)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        // Repeat verification of a promoted session is a no-op success.
        if session.state == SessionState::Verified {
            return Ok(session);
        }

        if session.is_expired() {
            return Err(AuthError::SessionNotFound);
        }

        let submitted = input.code.trim();
        match session.one_time_code.as_deref() {
            Some(expected) if expected == submitted => {
                let mut session = session;
                session.state = SessionState::Verified;
                session.one_time_code = None;
                self.sessions.put(&session).await?;
                Ok(session)
            }
            _ => Err(AuthError::CodeMismatch),
        }
    }
}

// ── ResendCode ────────────────────────────────────────────────────────────────

/// Uniform success/message shape for resend, so a non-blocking caller can
/// poll the outcome without treating delivery failure as a dead end.
#[derive(Debug)]
pub struct ResendCodeOutput {
    pub success: bool,
    pub message: String,
}

pub struct ResendCodeUseCase<S, D>
where
    S: SessionRepository,
    D: CodeDelivery,
{
    pub sessions: S,
    pub delivery: D,
    pub codes: CodeGenerator,
}

impl<S, D> ResendCodeUseCase<S, D>
where
    S: SessionRepository,
    D: CodeDelivery,
{
    /// Regenerate and redeliver the session's one-time code. The stored code
    /// is overwritten before delivery, so only the latest issued code
    /// verifies. Unknown or expired sessions fail with `SessionNotFound`;
    /// everything else reports through the success/message shape.
    pub async fn execute(&self, session_id: &str) -> Result<ResendCodeOutput, AuthError> {
        let mut session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired() {
            return Err(AuthError::SessionNotFound);
        }

        if session.state == SessionState::Verified {
            return Ok(ResendCodeOutput {
                success: false,
                message: "session is already verified".to_owned(),
            });
        }

        match issue_one_time_code(&self.sessions, &self.delivery, &self.codes, &mut session).await {
            Ok(()) => Ok(ResendCodeOutput {
                success: true,
                message: "code has been sent".to_owned(),
            }),
            Err(AuthError::Delivery { reason }) => {
                tracing::warn!(
                    session_id = %session.id,
                    reason = %reason,
                    "one-time code delivery failed at resend"
                );
                Ok(ResendCodeOutput {
                    success: false,
                    message: "there was a problem sending your code, please try again".to_owned(),
                })
            }
            Err(e) => Err(e),
        }
    }
}
