//! Application Configuration
//!
//! Configuration for the Auth application layer.

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Issuer shown in authenticator apps; goes into the otpauth URI for
    /// every enrollment QR
    pub totp_issuer: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            totp_issuer: "device-2fa".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with a custom issuer
    pub fn with_issuer(issuer: impl Into<String>) -> Self {
        Self {
            totp_issuer: issuer.into(),
        }
    }
}
