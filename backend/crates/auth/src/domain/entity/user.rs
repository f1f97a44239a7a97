//! User Entity
//!
//! User identity record. Accounts are created out-of-band; this core
//! only ever mutates `requires_two_factor`, and never deletes a user.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, password_hash::PasswordHash, user_id::UserId,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Email address (unique, used for login)
    pub email: Email,
    /// Display name, also the otpauth account label
    pub username: String,
    /// Hashed credential
    pub password_hash: PasswordHash,
    /// Whether 2FA is in effect for this account
    pub requires_two_factor: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: Email, username: impl Into<String>, password_hash: PasswordHash) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            username: username.into(),
            password_hash,
            requires_two_factor: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Verify a presented credential against the stored hash
    pub fn verify_password(&self, raw: &str) -> bool {
        self.password_hash.verify(raw)
    }

    /// Turn 2FA on for this account (set by enrollment confirmation,
    /// never unset by this core)
    pub fn enable_two_factor(&mut self) {
        self.requires_two_factor = true;
        self.updated_at = Utc::now();
    }
}

/// Public profile for API responses (non-sensitive)
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: Email,
    pub username: String,
    pub requires_two_factor: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.clone(),
            username: user.username.clone(),
            requires_two_factor: user.requires_two_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new(
            Email::new("a@x.com").unwrap(),
            "alice",
            PasswordHash::from_raw("pw1"),
        )
    }

    #[test]
    fn test_new_user_has_two_factor_off() {
        let user = test_user();
        assert!(!user.requires_two_factor);
    }

    #[test]
    fn test_enable_two_factor() {
        let mut user = test_user();
        user.enable_two_factor();
        assert!(user.requires_two_factor);
        assert!(user.updated_at >= user.created_at);
    }

    #[test]
    fn test_verify_password() {
        let user = test_user();
        assert!(user.verify_password("pw1"));
        assert!(!user.verify_password("pw2"));
    }
}
