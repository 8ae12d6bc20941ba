use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::infra::delivery::HttpCodeDelivery;
use crate::infra::memory::{MemoryCredentialStore, MemorySessionStore};
use crate::otp::CodeGenerator;
use crate::usecase::code::{ResendCodeUseCase, VerifyCodeUseCase};
use crate::usecase::credential::CreateCredentialUseCase;
use crate::usecase::login::BeginLoginUseCase;
use crate::usecase::session::{DestroySessionUseCase, LookupByTokenUseCase};

/// Shared wiring for the in-memory deployment: one session store, one
/// credential store, one delivery adapter, one code generator. Cheap to
/// clone; an embedding layer holds one of these and builds a usecase per
/// operation.
#[derive(Clone)]
pub struct AppState {
    pub sessions: MemorySessionStore,
    pub credentials: MemoryCredentialStore,
    pub delivery: HttpCodeDelivery,
    pub codes: CodeGenerator,
}

impl AppState {
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self {
            sessions: MemorySessionStore::new(),
            credentials: MemoryCredentialStore::new(),
            delivery: HttpCodeDelivery::new(config.delivery_url.clone()),
            codes: CodeGenerator::new(
                config.otp_secret.clone().into_bytes(),
                config.otp_digits,
                config.otp_step_secs,
            )?,
        })
    }

    pub fn create_credential(
        &self,
    ) -> CreateCredentialUseCase<MemoryCredentialStore, MemorySessionStore> {
        CreateCredentialUseCase {
            credentials: self.credentials.clone(),
            sessions: self.sessions.clone(),
        }
    }

    pub fn begin_login(
        &self,
    ) -> BeginLoginUseCase<MemoryCredentialStore, MemorySessionStore, HttpCodeDelivery> {
        BeginLoginUseCase {
            credentials: self.credentials.clone(),
            sessions: self.sessions.clone(),
            delivery: self.delivery.clone(),
            codes: self.codes.clone(),
        }
    }

    pub fn verify_code(&self) -> VerifyCodeUseCase<MemorySessionStore> {
        VerifyCodeUseCase {
            sessions: self.sessions.clone(),
        }
    }

    pub fn resend_code(&self) -> ResendCodeUseCase<MemorySessionStore, HttpCodeDelivery> {
        ResendCodeUseCase {
            sessions: self.sessions.clone(),
            delivery: self.delivery.clone(),
            codes: self.codes.clone(),
        }
    }

    pub fn lookup_by_token(&self) -> LookupByTokenUseCase<MemorySessionStore> {
        LookupByTokenUseCase {
            sessions: self.sessions.clone(),
        }
    }

    pub fn destroy_session(&self) -> DestroySessionUseCase<MemorySessionStore> {
        DestroySessionUseCase {
            sessions: self.sessions.clone(),
        }
    }
}
