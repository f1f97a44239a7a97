//! In-Memory Store Implementation
//!
//! Hash-map backed store with the same uniqueness guarantees the
//! Postgres schema enforces. Used by the use-case tests and for
//! storeless development.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::domain::entity::{
    device_session::DeviceSession, two_factor_secret::TwoFactorSecret, user::User,
};
use crate::domain::repository::{SecretRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{
    device_fingerprint::DeviceFingerprint, email::Email, user_id::UserId,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    /// Keyed by user id: the unique-constraint analogue
    secrets: HashMap<Uuid, TwoFactorSecret>,
    /// Keyed by (user id, device fingerprint)
    sessions: HashMap<(Uuid, String), DeviceSession>,
}

/// In-memory auth store
#[derive(Clone, Default)]
pub struct MemoryAuthStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AuthResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| AuthError::Internal("store lock poisoned".to_string()))
    }

    fn write(&self) -> AuthResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| AuthError::Internal("store lock poisoned".to_string()))
    }
}

impl UserRepository for MemoryAuthStore {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut inner = self.write()?;
        inner.users.insert(user.user_id.into_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let inner = self.read()?;
        Ok(inner.users.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let inner = self.read()?;
        Ok(inner.users.values().find(|u| &u.email == email).cloned())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut inner = self.write()?;
        match inner.users.entry(user.user_id.into_uuid()) {
            Entry::Occupied(mut e) => {
                e.insert(user.clone());
                Ok(())
            }
            Entry::Vacant(_) => Err(AuthError::UserNotFound),
        }
    }
}

impl SecretRepository for MemoryAuthStore {
    async fn create_if_absent(&self, secret: &TwoFactorSecret) -> AuthResult<TwoFactorSecret> {
        let mut inner = self.write()?;
        match inner.secrets.entry(secret.user_id.into_uuid()) {
            // First writer wins: a concurrent earlier insert is returned as-is
            Entry::Occupied(e) => Ok(e.get().clone()),
            Entry::Vacant(v) => {
                v.insert(secret.clone());
                Ok(secret.clone())
            }
        }
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<TwoFactorSecret>> {
        let inner = self.read()?;
        Ok(inner.secrets.get(user_id.as_uuid()).cloned())
    }
}

impl SessionRepository for MemoryAuthStore {
    async fn replace(&self, session: &DeviceSession) -> AuthResult<()> {
        let mut inner = self.write()?;
        let key = (
            session.user_id.into_uuid(),
            session.device_fingerprint.as_str().to_string(),
        );
        inner.sessions.insert(key, session.clone());
        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        device: &DeviceFingerprint,
    ) -> AuthResult<Option<DeviceSession>> {
        let inner = self.read()?;
        let key = (user_id.into_uuid(), device.as_str().to_string());
        Ok(inner.sessions.get(&key).cloned())
    }

    async fn update(&self, session: &DeviceSession) -> AuthResult<()> {
        let mut inner = self.write()?;
        let key = (
            session.user_id.into_uuid(),
            session.device_fingerprint.as_str().to_string(),
        );
        match inner.sessions.entry(key) {
            Entry::Occupied(mut e) => {
                e.insert(session.clone());
                Ok(())
            }
            Entry::Vacant(_) => Err(AuthError::SessionNotFound),
        }
    }

    async fn delete(&self, user_id: &UserId, device: &DeviceFingerprint) -> AuthResult<u64> {
        let mut inner = self.write()?;
        let key = (user_id.into_uuid(), device.as_str().to_string());
        Ok(inner.sessions.remove(&key).map_or(0, |_| 1))
    }
}
