//! Use-case tests for the auth crate
//!
//! Driven against the in-memory store so every test gets an isolated
//! universe of users, secrets, and sessions.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::device_status::{DeviceStatusUseCase, DeviceVerification};
use crate::application::enrollment::EnrollmentUseCase;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::logout::LogoutUseCase;
use crate::application::verify_otp::VerifyOtpUseCase;
use crate::domain::entity::user::User;
use crate::domain::repository::{SecretRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{
    device_fingerprint::DeviceFingerprint, email::Email, password_hash::PasswordHash,
    user_id::UserId,
};
use crate::error::AuthError;
use crate::infra::memory::MemoryAuthStore;

struct Harness {
    store: Arc<MemoryAuthStore>,
    config: Arc<AuthConfig>,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: Arc::new(MemoryAuthStore::new()),
            config: Arc::new(AuthConfig::default()),
        }
    }

    async fn seed_user(&self, email: &str, username: &str, password: &str) -> User {
        let user = User::new(
            Email::new(email).unwrap(),
            username,
            PasswordHash::from_raw(password),
        );
        self.store.create(&user).await.unwrap();
        user
    }

    fn login(&self) -> LoginUseCase<MemoryAuthStore, MemoryAuthStore> {
        LoginUseCase::new(self.store.clone(), self.store.clone(), self.config.clone())
    }

    fn status(&self) -> DeviceStatusUseCase<MemoryAuthStore, MemoryAuthStore> {
        DeviceStatusUseCase::new(self.store.clone(), self.store.clone(), self.config.clone())
    }

    fn logout(&self) -> LogoutUseCase<MemoryAuthStore, MemoryAuthStore> {
        LogoutUseCase::new(self.store.clone(), self.store.clone(), self.config.clone())
    }

    fn enrollment(&self) -> EnrollmentUseCase<MemoryAuthStore, MemoryAuthStore, MemoryAuthStore> {
        EnrollmentUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.config.clone(),
        )
    }

    fn verify(&self) -> VerifyOtpUseCase<MemoryAuthStore, MemoryAuthStore, MemoryAuthStore> {
        VerifyOtpUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.config.clone(),
        )
    }

    async fn do_login(&self, email: &str, password: &str, device: &str) {
        self.login()
            .execute(LoginInput {
                email: email.to_string(),
                password: password.to_string(),
                device_fingerprint: DeviceFingerprint::new(device),
            })
            .await
            .unwrap();
    }

    /// Current valid TOTP code for a user's persisted secret
    async fn current_code(&self, user: &User) -> String {
        let secret = self
            .store
            .find_by_user_id(&user.user_id)
            .await
            .unwrap()
            .expect("secret must be provisioned");
        secret
            .secret
            .generate_current(&user.username, &self.config.totp_issuer)
            .unwrap()
    }
}

#[cfg(test)]
mod login_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_unknown_user_fails() {
        let h = Harness::new();

        let result = h
            .login()
            .execute(LoginInput {
                email: "nobody@x.com".to_string(),
                password: "pw1".to_string(),
                device_fingerprint: DeviceFingerprint::new("chrome"),
            })
            .await;

        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_fails_and_creates_no_session() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;

        let result = h
            .login()
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "wrong".to_string(),
                device_fingerprint: DeviceFingerprint::new("chrome"),
            })
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        let session = h
            .store
            .find(&user.user_id, &DeviceFingerprint::new("chrome"))
            .await
            .unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_login_creates_unverified_session() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;

        let output = h
            .login()
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "pw1".to_string(),
                device_fingerprint: DeviceFingerprint::new("chrome"),
            })
            .await
            .unwrap();

        assert!(!output.verified);
        assert!(!output.profile.requires_two_factor);

        let session = h
            .store
            .find(&user.user_id, &DeviceFingerprint::new("chrome"))
            .await
            .unwrap()
            .unwrap();
        assert!(!session.verified);
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let h = Harness::new();
        h.seed_user("a@x.com", "alice", "pw1").await;

        let output = h
            .login()
            .execute(LoginInput {
                email: "A@X.COM".to_string(),
                password: "pw1".to_string(),
                device_fingerprint: DeviceFingerprint::new("chrome"),
            })
            .await
            .unwrap();

        assert_eq!(output.profile.email.as_str(), "a@x.com");
    }
}

#[cfg(test)]
mod status_tests {
    use super::*;

    #[tokio::test]
    async fn test_status_unknown_user_fails() {
        let h = Harness::new();
        let result = h
            .status()
            .execute(&UserId::new(), &DeviceFingerprint::new("chrome"))
            .await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_status_without_two_factor_skips_session_lookup() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        h.do_login("a@x.com", "pw1", "chrome").await;

        // 2FA off: no verification fields even though a session exists
        let output = h
            .status()
            .execute(&user.user_id, &DeviceFingerprint::new("chrome"))
            .await
            .unwrap();
        assert_eq!(output.verification, DeviceVerification::NotRequired);
    }

    #[tokio::test]
    async fn test_status_reports_unverified_after_login_until_otp() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        let device = DeviceFingerprint::new("chrome");

        // Enroll so 2FA is in effect, then re-login to reset the device
        h.do_login("a@x.com", "pw1", "chrome").await;
        h.enrollment().begin(&user.user_id).await.unwrap();
        let code = h.current_code(&user).await;
        h.enrollment()
            .confirm(&user.user_id, &device, Some(code.as_str()))
            .await
            .unwrap();
        h.do_login("a@x.com", "pw1", "chrome").await;

        let output = h.status().execute(&user.user_id, &device).await.unwrap();
        assert!(matches!(
            output.verification,
            DeviceVerification::Session { verified: false, .. }
        ));

        let code = h.current_code(&user).await;
        h.verify()
            .execute(&user.user_id, &device, Some(code.as_str()))
            .await
            .unwrap();

        let output = h.status().execute(&user.user_id, &device).await.unwrap();
        assert!(matches!(
            output.verification,
            DeviceVerification::Session { verified: true, .. }
        ));
    }

    #[tokio::test]
    async fn test_status_on_unknown_device_is_no_session() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        let device = DeviceFingerprint::new("chrome");

        h.do_login("a@x.com", "pw1", "chrome").await;
        h.enrollment().begin(&user.user_id).await.unwrap();
        let code = h.current_code(&user).await;
        h.enrollment()
            .confirm(&user.user_id, &device, Some(code.as_str()))
            .await
            .unwrap();

        // A different device identity string is a different device
        let output = h
            .status()
            .execute(&user.user_id, &DeviceFingerprint::new("firefox"))
            .await
            .unwrap();
        assert_eq!(output.verification, DeviceVerification::NoSession);
    }
}

#[cfg(test)]
mod logout_tests {
    use super::*;

    #[tokio::test]
    async fn test_logout_unknown_user_fails() {
        let h = Harness::new();
        let result = h
            .logout()
            .execute(&UserId::new(), &DeviceFingerprint::new("chrome"))
            .await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        let device = DeviceFingerprint::new("chrome");

        h.do_login("a@x.com", "pw1", "chrome").await;

        assert!(h.logout().execute(&user.user_id, &device).await.unwrap());
        // No session left: still not an error
        assert!(h.logout().execute(&user.user_id, &device).await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_then_status_reports_no_session() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        let device = DeviceFingerprint::new("chrome");

        h.do_login("a@x.com", "pw1", "chrome").await;
        h.enrollment().begin(&user.user_id).await.unwrap();
        let code = h.current_code(&user).await;
        h.enrollment()
            .confirm(&user.user_id, &device, Some(code.as_str()))
            .await
            .unwrap();

        h.logout().execute(&user.user_id, &device).await.unwrap();

        let output = h.status().execute(&user.user_id, &device).await.unwrap();
        assert_eq!(output.verification, DeviceVerification::NoSession);
    }
}

#[cfg(test)]
mod enrollment_tests {
    use super::*;

    #[tokio::test]
    async fn test_begin_enrollment_unknown_user_fails() {
        let h = Harness::new();
        let result = h.enrollment().begin(&UserId::new()).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_begin_enrollment_is_idempotent() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;

        let first = h.enrollment().begin(&user.user_id).await.unwrap();
        let second = h.enrollment().begin(&user.user_id).await.unwrap();

        // Same underlying secret both times
        assert_eq!(first.secret, second.secret);
        assert_eq!(first.otpauth_url, second.otpauth_url);

        let persisted = h
            .store
            .find_by_user_id(&user.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.secret.as_base32(), first.secret);
    }

    #[tokio::test]
    async fn test_enrollment_url_contains_account_and_issuer() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;

        let output = h.enrollment().begin(&user.user_id).await.unwrap();
        assert!(output.otpauth_url.starts_with("otpauth://totp/"));
        assert!(output.otpauth_url.contains("alice"));
        assert!(output.otpauth_url.contains(&h.config.totp_issuer));
        assert!(!output.qr_code_base64.is_empty());
    }

    #[tokio::test]
    async fn test_confirm_without_secret_fails() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        h.do_login("a@x.com", "pw1", "chrome").await;

        let result = h
            .enrollment()
            .confirm(
                &user.user_id,
                &DeviceFingerprint::new("chrome"),
                Some("000000"),
            )
            .await;
        assert!(matches!(result, Err(AuthError::SecretNotFound)));
    }

    #[tokio::test]
    async fn test_confirm_with_missing_code_fails() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        h.do_login("a@x.com", "pw1", "chrome").await;
        h.enrollment().begin(&user.user_id).await.unwrap();

        let device = DeviceFingerprint::new("chrome");
        let result = h.enrollment().confirm(&user.user_id, &device, None).await;
        assert!(matches!(result, Err(AuthError::MissingOtpCode)));

        let result = h
            .enrollment()
            .confirm(&user.user_id, &device, Some(""))
            .await;
        assert!(matches!(result, Err(AuthError::MissingOtpCode)));
    }

    #[tokio::test]
    async fn test_confirm_with_wrong_code_mutates_nothing() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        let device = DeviceFingerprint::new("chrome");

        h.do_login("a@x.com", "pw1", "chrome").await;
        h.enrollment().begin(&user.user_id).await.unwrap();

        let result = h
            .enrollment()
            .confirm(&user.user_id, &device, Some("000000"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidOtpCode)));

        let stored = h.store.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert!(!stored.requires_two_factor);

        let session = h.store.find(&user.user_id, &device).await.unwrap().unwrap();
        assert!(!session.verified);
    }

    #[tokio::test]
    async fn test_confirm_before_any_login_fails_with_session_not_found() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        h.enrollment().begin(&user.user_id).await.unwrap();
        let code = h.current_code(&user).await;

        let result = h
            .enrollment()
            .confirm(&user.user_id, &DeviceFingerprint::new("chrome"), Some(code.as_str()))
            .await;
        assert!(matches!(result, Err(AuthError::SessionNotFound)));

        // The account must not be half-enrolled
        let stored = h.store.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert!(!stored.requires_two_factor);
    }

    #[tokio::test]
    async fn test_confirm_enables_two_factor_and_verifies_device() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        let device = DeviceFingerprint::new("chrome");

        h.do_login("a@x.com", "pw1", "chrome").await;
        let before = h.store.find(&user.user_id, &device).await.unwrap().unwrap();

        h.enrollment().begin(&user.user_id).await.unwrap();
        let code = h.current_code(&user).await;
        let output = h
            .enrollment()
            .confirm(&user.user_id, &device, Some(code.as_str()))
            .await
            .unwrap();

        assert!(output.profile.requires_two_factor);
        assert!(output.verified);
        // Only the verification flag flips; the login timestamp stays
        assert_eq!(output.last_login_at, before.last_login_at);

        let session = h.store.find(&user.user_id, &device).await.unwrap().unwrap();
        assert!(session.verified);
        assert_eq!(session.session_id, before.session_id);
    }
}

#[cfg(test)]
mod verify_otp_tests {
    use super::*;

    #[tokio::test]
    async fn test_verify_with_wrong_code_mutates_nothing() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        let device = DeviceFingerprint::new("chrome");

        h.do_login("a@x.com", "pw1", "chrome").await;
        h.enrollment().begin(&user.user_id).await.unwrap();

        let result = h
            .verify()
            .execute(&user.user_id, &device, Some("000000"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidOtpCode)));

        let session = h.store.find(&user.user_id, &device).await.unwrap().unwrap();
        assert!(!session.verified);
    }

    #[tokio::test]
    async fn test_verify_before_any_login_fails_with_session_not_found() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        h.enrollment().begin(&user.user_id).await.unwrap();
        let code = h.current_code(&user).await;

        let result = h
            .verify()
            .execute(&user.user_id, &DeviceFingerprint::new("chrome"), Some(code.as_str()))
            .await;
        assert!(matches!(result, Err(AuthError::SessionNotFound)));
    }

    #[tokio::test]
    async fn test_relogin_resets_verification_and_verify_restores_it() {
        let h = Harness::new();
        let user = h.seed_user("a@x.com", "alice", "pw1").await;
        let device = DeviceFingerprint::new("chrome");

        // First login on "chrome": fresh unverified session
        h.do_login("a@x.com", "pw1", "chrome").await;

        // Enroll: secret provisioned, QR issued
        let enrollment = h.enrollment().begin(&user.user_id).await.unwrap();

        // Confirm with a valid code: 2FA on, this device verified
        let code = h.current_code(&user).await;
        let confirmed = h
            .enrollment()
            .confirm(&user.user_id, &device, Some(code.as_str()))
            .await
            .unwrap();
        assert!(confirmed.profile.requires_two_factor);
        assert!(confirmed.verified);
        let first_session = h.store.find(&user.user_id, &device).await.unwrap().unwrap();

        // Re-login on "chrome": new session row, unverified, secret untouched
        h.do_login("a@x.com", "pw1", "chrome").await;
        let relogin_session = h.store.find(&user.user_id, &device).await.unwrap().unwrap();
        assert_ne!(relogin_session.session_id, first_session.session_id);
        assert!(!relogin_session.verified);

        let persisted = h
            .store
            .find_by_user_id(&user.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.secret.as_base32(), enrollment.secret);

        // The same secret still verifies the new session
        let code = h.current_code(&user).await;
        let output = h
            .verify()
            .execute(&user.user_id, &device, Some(code.as_str()))
            .await
            .unwrap();
        assert!(output.verified);

        let session = h.store.find(&user.user_id, &device).await.unwrap().unwrap();
        assert!(session.verified);
        assert_eq!(session.session_id, relogin_session.session_id);
    }
}
