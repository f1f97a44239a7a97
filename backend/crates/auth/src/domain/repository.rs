//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{
    device_session::DeviceSession, two_factor_secret::TwoFactorSecret, user::User,
};
use crate::domain::value_object::{
    device_fingerprint::DeviceFingerprint, email::Email, user_id::UserId,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user (out-of-band seeding; not a service operation)
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Two-factor secret repository trait
#[trait_variant::make(SecretRepository: Send)]
pub trait LocalSecretRepository {
    /// Insert the secret unless the user already has one, and return the
    /// row that ended up persisted. First writer wins: under concurrent
    /// first-time enrollment, exactly one secret survives and every
    /// caller observes it.
    async fn create_if_absent(&self, secret: &TwoFactorSecret) -> AuthResult<TwoFactorSecret>;

    /// Find a user's secret
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<TwoFactorSecret>>;
}

/// Device session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Write a fresh session for (user, device), replacing any existing
    /// row for that pair. Keyed by the (user_id, device_fingerprint)
    /// uniqueness invariant.
    async fn replace(&self, session: &DeviceSession) -> AuthResult<()>;

    /// Find the session for (user, device)
    async fn find(
        &self,
        user_id: &UserId,
        device: &DeviceFingerprint,
    ) -> AuthResult<Option<DeviceSession>>;

    /// Update a session (e.g. verification flip)
    async fn update(&self, session: &DeviceSession) -> AuthResult<()>;

    /// Delete the session for (user, device); returns the number of
    /// deleted rows (zero is not an error)
    async fn delete(&self, user_id: &UserId, device: &DeviceFingerprint) -> AuthResult<u64>;
}
