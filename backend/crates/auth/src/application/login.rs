//! Login Use Case
//!
//! Authenticates a user and (re)creates the session for the calling
//! device. A login always produces a fresh unverified session: any
//! verification the device held before is gone afterward.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::domain::entity::device_session::DeviceSession;
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{device_fingerprint::DeviceFingerprint, email::Email};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
    /// Opaque device identity string
    pub device_fingerprint: DeviceFingerprint,
}

/// Login output: public profile merged with the fresh session's state
pub struct LoginOutput {
    pub profile: UserProfile,
    /// Always false right after login
    pub verified: bool,
    pub last_login_at: DateTime<Utc>,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    #[allow(dead_code)]
    config: Arc<AuthConfig>,
}

impl<U, S> LoginUseCase<U, S>
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

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::UserNotFound)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.verify_password(&input.password) {
            return Err(AuthError::InvalidCredentials);
        }

        // Fresh session, replacing whatever the device had before
        let session = DeviceSession::new(user.user_id, input.device_fingerprint);
        self.session_repo.replace(&session).await?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User logged in"
        );

        Ok(LoginOutput {
            profile: UserProfile::from(&user),
            verified: session.verified,
            last_login_at: session.last_login_at,
        })
    }
}
