//! OTP Verification Use Case
//!
//! Re-verifies an already-enrolled user on one device: checks the code
//! against the stored secret and flips that device's session to
//! verified. Used after a fresh login has reset the device to
//! unverified.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::{SecretRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{device_fingerprint::DeviceFingerprint, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Verification output: profile merged with the now-verified session
pub struct VerifiedOutput {
    pub profile: UserProfile,
    pub verified: bool,
    pub last_login_at: DateTime<Utc>,
}

/// OTP verification use case
pub struct VerifyOtpUseCase<U, T, S>
where
    U: UserRepository,
    T: SecretRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    secret_repo: Arc<T>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, T, S> VerifyOtpUseCase<U, T, S>
where
    U: UserRepository,
    T: SecretRepository,
    S: SessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        secret_repo: Arc<T>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            secret_repo,
            session_repo,
            config,
        }
    }

    /// Same validation chain as enrollment confirmation, without the
    /// `requires_two_factor` mutation. The session must already exist
    /// from a prior login on this device.
    pub async fn execute(
        &self,
        user_id: &UserId,
        device: &DeviceFingerprint,
        otp_code: Option<&str>,
    ) -> AuthResult<VerifiedOutput> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let secret = self
            .secret_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AuthError::SecretNotFound)?;

        let code = otp_code
            .filter(|c| !c.is_empty())
            .ok_or(AuthError::MissingOtpCode)?;

        let valid = secret
            .secret
            .verify(code, user.username.as_str(), &self.config.totp_issuer)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        if !valid {
            return Err(AuthError::InvalidOtpCode);
        }

        let mut session = self
            .session_repo
            .find(user_id, device)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        session.mark_verified();
        self.session_repo.update(&session).await?;

        tracing::info!(
            user_id = %user_id,
            session_id = %session.session_id,
            "Device OTP verified"
        );

        Ok(VerifiedOutput {
            profile: UserProfile::from(&user),
            verified: session.verified,
            last_login_at: session.last_login_at,
        })
    }
}
