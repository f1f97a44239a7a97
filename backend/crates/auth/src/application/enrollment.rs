//! Enrollment Use Case
//!
//! QR-code based association of a TOTP secret with a user account.
//! `begin` provisions the secret (lazily, once per user) and issues the
//! QR; `confirm` checks the first code from the authenticator, turns 2FA
//! on for the account, and marks the calling device verified.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::domain::entity::two_factor_secret::TwoFactorSecret;
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::{SecretRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{device_fingerprint::DeviceFingerprint, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Enrollment QR output
pub struct EnrollmentOutput {
    /// QR code as base64-encoded PNG
    pub qr_code_base64: String,
    /// Secret for manual entry
    pub secret: String,
    /// otpauth:// URL
    pub otpauth_url: String,
}

/// Confirmation output: profile merged with the now-verified session
pub struct ConfirmOutput {
    pub profile: UserProfile,
    pub verified: bool,
    pub last_login_at: DateTime<Utc>,
}

/// Enrollment use case
pub struct EnrollmentUseCase<U, T, S>
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

impl<U, T, S> EnrollmentUseCase<U, T, S>
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

    /// Begin enrollment: provision the secret if the user has none, and
    /// return a scannable QR for it.
    ///
    /// Idempotent: repeated calls issue a QR for the same underlying
    /// secret. Under concurrent first-time calls the store keeps exactly
    /// one secret (first writer wins) and every caller gets that one.
    pub async fn begin(&self, user_id: &UserId) -> AuthResult<EnrollmentOutput> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let secret = match self.secret_repo.find_by_user_id(user_id).await? {
            Some(existing) => existing,
            None => {
                let fresh = TwoFactorSecret::generate_for(*user_id);
                self.secret_repo.create_if_absent(&fresh).await?
            }
        };

        let issuer = &self.config.totp_issuer;
        let account_name = user.username.as_str();

        let qr_code = secret
            .secret
            .generate_qr_code(account_name, issuer)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let otpauth_url = secret
            .secret
            .get_otpauth_url(account_name, issuer)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(
            user_id = %user_id,
            "Enrollment QR issued"
        );

        Ok(EnrollmentOutput {
            qr_code_base64: qr_code,
            secret: secret.secret.as_base32().to_string(),
            otpauth_url,
        })
    }

    /// Confirm enrollment with the first OTP code: turns
    /// `requires_two_factor` on for the account and marks the calling
    /// device's session verified.
    ///
    /// The session must already exist from a prior login; confirmation
    /// never creates one.
    pub async fn confirm(
        &self,
        user_id: &UserId,
        device: &DeviceFingerprint,
        otp_code: Option<&str>,
    ) -> AuthResult<ConfirmOutput> {
        let mut user = self
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

        user.enable_two_factor();
        self.user_repo.update(&user).await?;

        session.mark_verified();
        self.session_repo.update(&session).await?;

        tracing::info!(
            user_id = %user_id,
            session_id = %session.session_id,
            "Two-factor enrollment confirmed"
        );

        Ok(ConfirmOutput {
            profile: UserProfile::from(&user),
            verified: session.verified,
            last_login_at: session.last_login_at,
        })
    }
}
