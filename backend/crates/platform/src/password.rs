//! Credential Digest Storage
//!
//! Stores credentials as a SHA-256 digest (base64-encoded) and verifies
//! presented credentials with a constant-time comparison. Equality
//! verification only; password strength rules are not this module's
//! concern.

use crate::crypto::{constant_time_eq, from_base64, sha256, to_base64};

/// Hash a clear-text credential for storage.
pub fn hash_credential(raw: &str) -> String {
    to_base64(&sha256(raw.as_bytes()))
}

/// Verify a presented credential against a stored digest.
///
/// Comparison is constant-time over the digest bytes; an undecodable
/// stored value never matches.
pub fn verify_credential(raw: &str, stored: &str) -> bool {
    let presented = sha256(raw.as_bytes());
    match from_base64(stored) {
        Ok(stored_digest) => constant_time_eq(&presented, &stored_digest),
        Err(_) => false,
    }
}
