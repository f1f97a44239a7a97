//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use std::sync::Arc;
use uuid::Uuid;

use platform::client::extract_device_fingerprint;

use crate::application::config::AuthConfig;
use crate::application::{
    DeviceStatusUseCase, EnrollmentUseCase, LoginInput, LoginUseCase, LogoutUseCase,
    VerifyOtpUseCase,
};
use crate::domain::repository::{SecretRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{device_fingerprint::DeviceFingerprint, user_id::UserId};
use crate::error::AuthResult;
use crate::presentation::dto::{
    EnrollmentResponse, LoginRequest, LogoutResponse, OtpRequest, UserAuthResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SecretRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Device identity from the request headers
fn device_from(headers: &HeaderMap) -> AuthResult<DeviceFingerprint> {
    let raw = extract_device_fingerprint(headers)?;
    Ok(DeviceFingerprint::new(raw))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<UserAuthResponse>>
where
    R: UserRepository + SecretRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let device = device_from(&headers)?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
            device_fingerprint: device,
        })
        .await?;

    Ok(Json(output.into()))
}

// ============================================================================
// Device Status
// ============================================================================

/// GET /users/{id}
pub async fn device_status<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> AuthResult<Json<UserAuthResponse>>
where
    R: UserRepository + SecretRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let device = device_from(&headers)?;

    let use_case =
        DeviceStatusUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case.execute(&UserId::from_uuid(id), &device).await?;

    Ok(Json(output.into()))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /users/{id}/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> AuthResult<Json<LogoutResponse>>
where
    R: UserRepository + SecretRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let device = device_from(&headers)?;

    let use_case = LogoutUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let logged_out = use_case.execute(&UserId::from_uuid(id), &device).await?;

    Ok(Json(LogoutResponse { logged_out }))
}

// ============================================================================
// Enrollment
// ============================================================================

/// GET /users/{id}/2fa/qrcode
pub async fn enrollment_qr<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<Uuid>,
) -> AuthResult<Json<EnrollmentResponse>>
where
    R: UserRepository + SecretRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = EnrollmentUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case.begin(&UserId::from_uuid(id)).await?;

    Ok(Json(output.into()))
}

/// POST /users/{id}/2fa/confirm
pub async fn confirm_enrollment<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<OtpRequest>,
) -> AuthResult<Json<UserAuthResponse>>
where
    R: UserRepository + SecretRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let device = device_from(&headers)?;

    let use_case = EnrollmentUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case
        .confirm(&UserId::from_uuid(id), &device, req.code.as_deref())
        .await?;

    Ok(Json(output.into()))
}

// ============================================================================
// OTP Verification
// ============================================================================

/// POST /users/{id}/2fa/verify
pub async fn verify_otp<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<OtpRequest>,
) -> AuthResult<Json<UserAuthResponse>>
where
    R: UserRepository + SecretRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let device = device_from(&headers)?;

    let use_case = VerifyOtpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(&UserId::from_uuid(id), &device, req.code.as_deref())
        .await?;

    Ok(Json(output.into()))
}
