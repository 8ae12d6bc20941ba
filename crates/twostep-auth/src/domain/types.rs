use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use twostep_domain::credential::Credential;

use crate::keys::generate_key;

/// Session id length in hex characters (short-lived verification lookup key).
pub const SESSION_ID_LEN: usize = 32;

/// Session token length in hex characters (long-lived bearer credential,
/// deliberately longer than the id and drawn independently of it).
pub const SESSION_TOKEN_LEN: usize = 64;

/// How long a pending session accepts verification or resend, in seconds.
pub const PENDING_SESSION_TTL_SECS: i64 = 600;

/// Bound on a single code delivery attempt, in seconds.
pub const CODE_DELIVERY_TIMEOUT_SECS: u64 = 10;

/// Lifecycle state of an authentication session.
///
/// Wire format: lowercase string (`"pending"` or `"verified"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Awaiting one-time-code verification; the token is not yet a credential.
    Pending,
    /// Promoted; the token is usable as a bearer credential.
    Verified,
}

/// One login attempt's lifecycle record, from credential check through
/// optional second-factor verification to a usable bearer token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub token: String,
    pub subject: Credential,
    pub state: SessionState,
    /// Current expected one-time code. `Some` only while `Pending`;
    /// overwritten on every (re)send, cleared on promotion.
    pub one_time_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// New session awaiting one-time-code verification.
    pub fn pending(subject: Credential) -> Self {
        Self::create(subject, SessionState::Pending)
    }

    /// New session verified at creation (flows that skip the second factor).
    pub fn verified(subject: Credential) -> Self {
        Self::create(subject, SessionState::Verified)
    }

    fn create(subject: Credential, state: SessionState) -> Self {
        Self {
            id: generate_key(SESSION_ID_LEN),
            token: generate_key(SESSION_TOKEN_LEN),
            subject,
            state,
            one_time_code: None,
            created_at: Utc::now(),
        }
    }

    /// A pending session stops accepting verification and resend once its
    /// window has passed. Verified sessions do not expire.
    pub fn is_expired(&self) -> bool {
        self.state == SessionState::Pending
            && self.created_at + Duration::seconds(PENDING_SESSION_TTL_SECS) <= Utc::now()
    }
}
