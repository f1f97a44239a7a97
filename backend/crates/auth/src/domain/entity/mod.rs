//! Entity Module

pub mod device_session;
pub mod two_factor_secret;
pub mod user;
