use totp_rs::{Algorithm, TOTP};

use crate::error::AuthError;

/// Time-based one-time code generator. Pure: the same secret and time window
/// always produce the same code, zero-padded to the configured width.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    totp: TOTP,
}

impl CodeGenerator {
    /// Build a generator from a shared secret (at least 128 bits), a code
    /// width in digits, and a time step in seconds.
    pub fn new(secret: Vec<u8>, digits: usize, step_secs: u64) -> Result<Self, AuthError> {
        let totp = TOTP::new(
            Algorithm::SHA1,
            digits,
            1,
            step_secs,
            secret,
            None,          // no issuer
            String::new(), // no account name
        )
        .map_err(|e| AuthError::Internal(anyhow::anyhow!("one-time code configuration: {e}")))?;
        Ok(Self { totp })
    }

    /// Code for the current time window.
    pub fn current_code(&self) -> Result<String, AuthError> {
        self.totp
            .generate_current()
            .map_err(|e| AuthError::Internal(e.into()))
    }

    /// Code pinned to an explicit unix timestamp. Deterministic; used by
    /// callers that need window-exact behavior (tests, clock injection).
    pub fn code_at(&self, unix_secs: u64) -> String {
        self.totp.generate(unix_secs)
    }
}
