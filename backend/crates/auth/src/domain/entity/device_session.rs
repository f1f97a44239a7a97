//! Device Session Entity
//!
//! Per-(user, device) trust record. A row is (re)created on every
//! successful login with `verified = false`, flipped to verified by an
//! OTP check, and deleted by logout. Invariant: `verified` is never
//! true unless an OTP check has passed since the row was (re)created.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    device_fingerprint::DeviceFingerprint, session_id::SessionId, user_id::UserId,
};

/// Device session entity
#[derive(Debug, Clone)]
pub struct DeviceSession {
    /// Session ID (UUID v4)
    pub session_id: SessionId,
    /// Reference to User
    pub user_id: UserId,
    /// Opaque device identity string
    pub device_fingerprint: DeviceFingerprint,
    /// Whether this device has passed an OTP check since (re)creation
    pub verified: bool,
    /// Last successful login on this device
    pub last_login_at: DateTime<Utc>,
}

impl DeviceSession {
    /// Create a fresh, unverified session for a login
    pub fn new(user_id: UserId, device_fingerprint: DeviceFingerprint) -> Self {
        Self {
            session_id: SessionId::new(),
            user_id,
            device_fingerprint,
            verified: false,
            last_login_at: Utc::now(),
        }
    }

    /// Mark the device as verified after a successful OTP check.
    /// `last_login_at` stays untouched.
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }
}
