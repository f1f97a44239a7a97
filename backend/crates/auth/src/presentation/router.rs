//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{SecretRepository, SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthStore;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the PostgreSQL store
pub fn auth_router(repo: PgAuthStore, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any store implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + SecretRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/users/{id}", get(handlers::device_status::<R>))
        .route("/users/{id}/logout", post(handlers::logout::<R>))
        .route("/users/{id}/2fa/qrcode", get(handlers::enrollment_qr::<R>))
        .route(
            "/users/{id}/2fa/confirm",
            post(handlers::confirm_enrollment::<R>),
        )
        .route("/users/{id}/2fa/verify", post(handlers::verify_otp::<R>))
        .with_state(state)
}
