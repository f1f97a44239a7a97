//! Logout Use Case
//!
//! Deletes the calling device's session. Idempotent: logging out a
//! device with no session is not an error.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{device_fingerprint::DeviceFingerprint, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Logout use case
pub struct LogoutUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    #[allow(dead_code)]
    config: Arc<AuthConfig>,
}

impl<U, S> LogoutUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Returns true once the device holds no session.
    pub async fn execute(&self, user_id: &UserId, device: &DeviceFingerprint) -> AuthResult<bool> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let deleted = self.session_repo.delete(user_id, device).await?;

        tracing::info!(
            user_id = %user_id,
            sessions_deleted = deleted,
            "User logged out"
        );

        Ok(true)
    }
}
