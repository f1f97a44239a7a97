//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64, constant-time comparison)
//! - Credential digest storage and verification
//! - Client device identification

pub mod client;
pub mod crypto;
pub mod password;
