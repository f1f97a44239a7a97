//! Device Fingerprint Value Object
//!
//! Opaque device identity string supplied by the caller (typically the
//! raw User-Agent header). No canonicalization is performed: two
//! fingerprints identify the same device exactly when the strings are
//! equal, so a client that changes its identity string counts as a new
//! device.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceFingerprint(String);

impl DeviceFingerprint {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for DeviceFingerprint {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for DeviceFingerprint {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl std::fmt::Display for DeviceFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
