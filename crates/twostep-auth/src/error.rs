use twostep_domain::credential::ValidationErrors;

/// Authentication flow error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username/password combination is invalid")]
    InvalidCredentials,
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("username has been taken")]
    UsernameTaken,
    #[error("no session found by the given id")]
    SessionNotFound,
    #[error("verification code incorrect")]
    CodeMismatch,
    #[error("code delivery failed: {reason}")]
    Delivery { reason: String },
    #[error("session store unavailable")]
    StoreUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    /// Stable discriminant for callers that map outcomes to wire responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Validation(_) => "VALIDATION",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::CodeMismatch => "CODE_MISMATCH",
            Self::Delivery { .. } => "DELIVERY_FAILED",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}
