//! Value Object Module

pub mod device_fingerprint;
pub mod email;
pub mod otp_secret;
pub mod password_hash;
pub mod secret_id;
pub mod session_id;
pub mod user_id;
