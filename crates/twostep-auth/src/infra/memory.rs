use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use twostep_domain::credential::Credential;

use crate::domain::repository::{CredentialStore, CredentialVerifier, SessionRepository};
use crate::domain::types::AuthSession;
use crate::error::AuthError;

// ── Session store ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct SessionIndexes {
    by_id: HashMap<String, AuthSession>,
    /// Secondary index: token → id. Keeps token lookups O(1) instead of a
    /// scan over `by_id`.
    id_by_token: HashMap<String, String>,
}

/// In-memory session store. Records are replaced whole under a single write
/// lock; the lock is never held across an await point.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<SessionIndexes>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, SessionIndexes>, AuthError> {
        self.inner.read().map_err(|_| AuthError::StoreUnavailable)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SessionIndexes>, AuthError> {
        self.inner.write().map_err(|_| AuthError::StoreUnavailable)
    }
}

impl SessionRepository for MemorySessionStore {
    async fn put(&self, session: &AuthSession) -> Result<(), AuthError> {
        let mut inner = self.write()?;
        // Replacing a record must not leave a stale token index entry.
        let stale = inner
            .by_id
            .get(&session.id)
            .filter(|previous| previous.token != session.token)
            .map(|previous| previous.token.clone());
        if let Some(stale) = stale {
            inner.id_by_token.remove(&stale);
        }
        inner
            .id_by_token
            .insert(session.token.clone(), session.id.clone());
        inner.by_id.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AuthSession>, AuthError> {
        Ok(self.read()?.by_id.get(id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<AuthSession>, AuthError> {
        let inner = self.read()?;
        Ok(inner
            .id_by_token
            .get(token)
            .and_then(|id| inner.by_id.get(id))
            .cloned())
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), AuthError> {
        let mut inner = self.write()?;
        if let Some(id) = inner.id_by_token.remove(token) {
            inner.by_id.remove(&id);
        }
        Ok(())
    }
}

// ── Credential store ──────────────────────────────────────────────────────────

/// In-memory credential store for development and tests. Passwords are
/// compared verbatim; real verifiers live behind the same ports.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    inner: Arc<RwLock<HashMap<String, Credential>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn create(&self, credential: &Credential) -> Result<(), AuthError> {
        let mut users = self
            .inner
            .write()
            .map_err(|_| AuthError::StoreUnavailable)?;
        if users.contains_key(&credential.username) {
            return Err(AuthError::UsernameTaken);
        }
        users.insert(credential.username.clone(), credential.clone());
        Ok(())
    }
}

impl CredentialVerifier for MemoryCredentialStore {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Credential>, AuthError> {
        let users = self.inner.read().map_err(|_| AuthError::StoreUnavailable)?;
        Ok(users
            .get(username)
            .filter(|c| c.password == password)
            .cloned())
    }
}
