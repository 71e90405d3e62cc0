use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::domain::{AccountView, LoginRequest, LoginResponse, RegisterRequest};
use super::service::AccountService;
use crate::auth::Authenticator;
use crate::error::ServiceError;

#[derive(Clone)]
pub struct AccountsApi {
    pub auth: Arc<Authenticator>,
    pub service: Arc<AccountService>,
}

pub fn account_router(state: AccountsApi) -> Router {
    Router::new()
        .route("/api/v1/auth/register", post(register_handler))
        .route("/api/v1/auth/login", post(login_handler))
        .route("/api/v1/auth/me", get(me_handler))
        .with_state(state)
}

pub(crate) async fn register_handler(
    State(state): State<AccountsApi>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let view = state.service.register(payload)?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub(crate) async fn login_handler(
    State(state): State<AccountsApi>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServiceError> {
    Ok(Json(state.service.login(payload)?))
}

pub(crate) async fn me_handler(
    State(state): State<AccountsApi>,
    headers: HeaderMap,
) -> Result<Json<AccountView>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    Ok(Json(state.service.current(&actor)?))
}
