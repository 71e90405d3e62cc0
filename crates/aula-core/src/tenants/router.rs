use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{post, put};
use axum::{Json, Router};

use super::domain::{CreateTenantRequest, Tenant, UpdateTenantRequest};
use super::service::TenantService;
use crate::auth::Authenticator;
use crate::domain::TenantId;
use crate::error::ServiceError;

#[derive(Clone)]
pub struct TenantsApi {
    pub auth: Arc<Authenticator>,
    pub service: Arc<TenantService>,
}

pub fn tenant_router(state: TenantsApi) -> Router {
    Router::new()
        .route("/api/v1/schools", post(create_handler).get(list_handler))
        .route("/api/v1/schools/:school_id", put(update_handler))
        .with_state(state)
}

pub(crate) async fn create_handler(
    State(state): State<TenantsApi>,
    headers: HeaderMap,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    let tenant = state.service.create(&actor, payload)?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

pub(crate) async fn list_handler(
    State(state): State<TenantsApi>,
    headers: HeaderMap,
) -> Result<Json<Vec<Tenant>>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    Ok(Json(state.service.list(&actor)?))
}

pub(crate) async fn update_handler(
    State(state): State<TenantsApi>,
    headers: HeaderMap,
    Path(school_id): Path<String>,
    Json(payload): Json<UpdateTenantRequest>,
) -> Result<Json<Tenant>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    let tenant = state
        .service
        .update(&actor, &TenantId(school_id), payload)?;
    Ok(Json(tenant))
}
