//! PostgreSQL Store Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    device_session::DeviceSession, two_factor_secret::TwoFactorSecret, user::User,
};
use crate::domain::repository::{SecretRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{
    device_fingerprint::DeviceFingerprint, email::Email, otp_secret::OtpSecret,
    password_hash::PasswordHash, secret_id::SecretId, session_id::SessionId, user_id::UserId,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth store
#[derive(Clone)]
pub struct PgAuthStore {
    pool: PgPool,
}

impl PgAuthStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthStore {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                username,
                password_hash,
                requires_two_factor,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.username)
        .bind(user.password_hash.as_str())
        .bind(user.requires_two_factor)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                username,
                password_hash,
                requires_two_factor,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                username,
                password_hash,
                requires_two_factor,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                password_hash = $3,
                requires_two_factor = $4,
                updated_at = $5
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.username)
        .bind(user.password_hash.as_str())
        .bind(user.requires_two_factor)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Secret Repository Implementation
// ============================================================================

impl SecretRepository for PgAuthStore {
    async fn create_if_absent(&self, secret: &TwoFactorSecret) -> AuthResult<TwoFactorSecret> {
        // First writer wins on the user_id unique constraint; losers fall
        // through to the re-select and observe the surviving row.
        sqlx::query(
            r#"
            INSERT INTO two_factor_secrets (
                secret_id,
                user_id,
                secret_base32,
                created_at
            ) VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(secret.secret_id.as_uuid())
        .bind(secret.user_id.as_uuid())
        .bind(secret.secret.as_base32())
        .bind(secret.created_at)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, SecretRow>(
            r#"
            SELECT secret_id, user_id, secret_base32, created_at
            FROM two_factor_secrets
            WHERE user_id = $1
            "#,
        )
        .bind(secret.user_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        row.into_secret()
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<TwoFactorSecret>> {
        let row = sqlx::query_as::<_, SecretRow>(
            r#"
            SELECT secret_id, user_id, secret_base32, created_at
            FROM two_factor_secrets
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_secret()).transpose()
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthStore {
    async fn replace(&self, session: &DeviceSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO device_sessions (
                session_id,
                user_id,
                device_fingerprint,
                verified,
                last_login_at
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, device_fingerprint) DO UPDATE SET
                session_id = EXCLUDED.session_id,
                verified = EXCLUDED.verified,
                last_login_at = EXCLUDED.last_login_at
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.device_fingerprint.as_str())
        .bind(session.verified)
        .bind(session.last_login_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        device: &DeviceFingerprint,
    ) -> AuthResult<Option<DeviceSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_id, user_id, device_fingerprint, verified, last_login_at
            FROM device_sessions
            WHERE user_id = $1 AND device_fingerprint = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(device.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_session()))
    }

    async fn update(&self, session: &DeviceSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE device_sessions SET
                verified = $2,
                last_login_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.verified)
        .bind(session.last_login_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: &UserId, device: &DeviceFingerprint) -> AuthResult<u64> {
        let deleted =
            sqlx::query("DELETE FROM device_sessions WHERE user_id = $1 AND device_fingerprint = $2")
                .bind(user_id.as_uuid())
                .bind(device.as_str())
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    username: String,
    password_hash: String,
    requires_two_factor: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            username: self.username,
            password_hash: PasswordHash::from_db(self.password_hash),
            requires_two_factor: self.requires_two_factor,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SecretRow {
    secret_id: Uuid,
    user_id: Uuid,
    secret_base32: String,
    created_at: DateTime<Utc>,
}

impl SecretRow {
    fn into_secret(self) -> AuthResult<TwoFactorSecret> {
        let secret = OtpSecret::from_base32(self.secret_base32)
            .map_err(|e| AuthError::Internal(format!("Invalid TOTP secret: {}", e)))?;

        Ok(TwoFactorSecret {
            secret_id: SecretId::from_uuid(self.secret_id),
            user_id: UserId::from_uuid(self.user_id),
            secret,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    device_fingerprint: String,
    verified: bool,
    last_login_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> DeviceSession {
        DeviceSession {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            device_fingerprint: DeviceFingerprint::new(self.device_fingerprint),
            verified: self.verified,
            last_login_at: self.last_login_at,
        }
    }
}
