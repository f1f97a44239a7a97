//! Client identification utilities
//!
//! Common functions for identifying client devices via HTTP headers.

use axum::http::{HeaderMap, header};

/// Error when extracting the device fingerprint
#[derive(Debug, Clone, thiserror::Error)]
pub enum FingerprintError {
    #[error("Missing required header: {0}")]
    MissingHeader(String),
}

/// Extract the device fingerprint from request headers.
///
/// The fingerprint is the raw `User-Agent` string, treated as an opaque
/// externally-supplied device identity. It is compared by string equality
/// only; a client that changes this string counts as a new device.
pub fn extract_device_fingerprint(headers: &HeaderMap) -> Result<String, FingerprintError> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .ok_or_else(|| FingerprintError::MissingHeader("User-Agent".to_string()))
}
