//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::device_status::{DeviceVerification, StatusOutput};
use crate::application::enrollment::{ConfirmOutput, EnrollmentOutput};
use crate::application::login::LoginOutput;
use crate::application::verify_otp::VerifiedOutput;
use crate::domain::entity::user::UserProfile;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Profile + device verification state
// ============================================================================

/// Public profile merged with the calling device's verification state.
///
/// The verification fields have three shapes, all meaningful to the
/// client: absent (2FA not in effect), `null` (2FA in effect but this
/// device has no session yet), or valued.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAuthResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub requires_two_factor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<Option<bool>>,
    /// Unix timestamp in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<Option<i64>>,
}

impl UserAuthResponse {
    fn from_profile(profile: &UserProfile) -> Self {
        Self {
            id: *profile.user_id.as_uuid(),
            email: profile.email.as_str().to_string(),
            username: profile.username.clone(),
            requires_two_factor: profile.requires_two_factor,
            is_verified: None,
            last_login_at: None,
        }
    }
}

impl From<LoginOutput> for UserAuthResponse {
    fn from(output: LoginOutput) -> Self {
        Self {
            is_verified: Some(Some(output.verified)),
            last_login_at: Some(Some(output.last_login_at.timestamp_millis())),
            ..Self::from_profile(&output.profile)
        }
    }
}

impl From<StatusOutput> for UserAuthResponse {
    fn from(output: StatusOutput) -> Self {
        let (is_verified, last_login_at) = match output.verification {
            DeviceVerification::NotRequired => (None, None),
            DeviceVerification::NoSession => (Some(None), Some(None)),
            DeviceVerification::Session {
                verified,
                last_login_at,
            } => (
                Some(Some(verified)),
                Some(Some(last_login_at.timestamp_millis())),
            ),
        };

        Self {
            is_verified,
            last_login_at,
            ..Self::from_profile(&output.profile)
        }
    }
}

impl From<ConfirmOutput> for UserAuthResponse {
    fn from(output: ConfirmOutput) -> Self {
        Self {
            is_verified: Some(Some(output.verified)),
            last_login_at: Some(Some(output.last_login_at.timestamp_millis())),
            ..Self::from_profile(&output.profile)
        }
    }
}

impl From<VerifiedOutput> for UserAuthResponse {
    fn from(output: VerifiedOutput) -> Self {
        Self {
            is_verified: Some(Some(output.verified)),
            last_login_at: Some(Some(output.last_login_at.timestamp_millis())),
            ..Self::from_profile(&output.profile)
        }
    }
}

// ============================================================================
// Logout
// ============================================================================

/// Logout response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub logged_out: bool,
}

// ============================================================================
// Enrollment
// ============================================================================

/// Enrollment QR response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    /// QR code as base64-encoded PNG
    pub qr_code: String,
    /// Secret for manual entry
    pub secret: String,
    /// otpauth:// URL
    pub otpauth_url: String,
}

impl From<EnrollmentOutput> for EnrollmentResponse {
    fn from(output: EnrollmentOutput) -> Self {
        Self {
            qr_code: output.qr_code_base64,
            secret: output.secret,
            otpauth_url: output.otpauth_url,
        }
    }
}

/// OTP code submission (enrollment confirmation and re-verification)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest {
    /// Absence is reported as a missing-input error by the service
    pub code: Option<String>,
}
