//! Device Status Use Case
//!
//! Read-only view of a user's profile and the calling device's
//! verification state.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{device_fingerprint::DeviceFingerprint, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Verification state of the calling device.
///
/// Absence is modeled explicitly: an account without 2FA has nothing to
/// report, and a 2FA account on a device that never logged in has a
/// session-less (not erroneous) state.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceVerification {
    /// 2FA is not in effect for this account; no session lookup happens
    NotRequired,
    /// 2FA is in effect but this device has no session yet
    NoSession,
    /// This device has a session
    Session {
        verified: bool,
        last_login_at: DateTime<Utc>,
    },
}

/// Device status output
pub struct StatusOutput {
    pub profile: UserProfile,
    pub verification: DeviceVerification,
}

/// Device status use case
pub struct DeviceStatusUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    #[allow(dead_code)]
    config: Arc<AuthConfig>,
}

impl<U, S> DeviceStatusUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        device: &DeviceFingerprint,
    ) -> AuthResult<StatusOutput> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let verification = if !user.requires_two_factor {
            DeviceVerification::NotRequired
        } else {
            match self.session_repo.find(user_id, device).await? {
                None => DeviceVerification::NoSession,
                Some(session) => DeviceVerification::Session {
                    verified: session.verified,
                    last_login_at: session.last_login_at,
                },
            }
        };

        Ok(StatusOutput {
            profile: UserProfile::from(&user),
            verification,
        })
    }
}
