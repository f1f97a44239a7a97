//! Password Hash Value Object
//!
//! Stored credential digest for a user. Delegates to
//! `platform::password` for hashing and constant-time verification.
//! Equality verification only; there is no strength policy here.

use std::fmt;

/// Hashed credential for storage
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Create by hashing a clear-text credential
    pub fn from_raw(raw: &str) -> Self {
        Self(platform::password::hash_credential(raw))
    }

    /// Create from a stored digest (from storage, assumed valid)
    pub fn from_db(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Get the digest string for storage
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify a presented credential against this digest.
    ///
    /// Constant-time over the digest bytes.
    pub fn verify(&self, raw: &str) -> bool {
        platform::password::verify_credential(raw, &self.0)
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}
