//! Two-Factor Secret Entity
//!
//! The one TOTP secret belonging to a user. Created lazily the first
//! time enrollment is requested and immutable afterward (no rotation).

use chrono::{DateTime, Utc};

use crate::domain::value_object::{otp_secret::OtpSecret, secret_id::SecretId, user_id::UserId};

/// Two-factor secret entity
#[derive(Debug, Clone)]
pub struct TwoFactorSecret {
    pub secret_id: SecretId,
    /// Reference to User (unique: at most one secret per user)
    pub user_id: UserId,
    /// The TOTP secret material
    pub secret: OtpSecret,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl TwoFactorSecret {
    /// Provision a fresh random secret for a user
    pub fn generate_for(user_id: UserId) -> Self {
        Self {
            secret_id: SecretId::new(),
            user_id,
            secret: OtpSecret::generate(),
            created_at: Utc::now(),
        }
    }
}
