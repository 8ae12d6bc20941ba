use crate::domain::repository::SessionRepository;
use crate::domain::types::{AuthSession, SessionState};
use crate::error::AuthError;

// ── LookupByToken ─────────────────────────────────────────────────────────────

pub struct LookupByTokenUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> LookupByTokenUseCase<S> {
    /// Resolve a bearer token to its session. Returns `None` for unknown
    /// tokens AND for sessions still pending verification; a token is only
    /// a credential once the session is verified.
    pub async fn execute(&self, token: &str) -> Result<Option<AuthSession>, AuthError> {
        let Some(session) = self.sessions.find_by_token(token).await? else {
            return Ok(None);
        };
        if session.state != SessionState::Verified {
            return Ok(None);
        }
        Ok(Some(session))
    }
}

// ── DestroySession (logout) ───────────────────────────────────────────────────

pub struct DestroySessionUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> DestroySessionUseCase<S> {
    /// Token-keyed delete. Idempotent: logout always succeeds from the
    /// caller's perspective, even for a token that was never issued.
    pub async fn execute(&self, token: &str) -> Result<(), AuthError> {
        self.sessions.delete_by_token(token).await
    }
}
