use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};

use super::service::{DashboardService, DashboardStats};
use crate::auth::Authenticator;
use crate::error::ServiceError;

#[derive(Clone)]
pub struct DashboardApi {
    pub auth: Arc<Authenticator>,
    pub service: Arc<DashboardService>,
}

pub fn dashboard_router(state: DashboardApi) -> Router {
    Router::new()
        .route("/api/v1/dashboard/stats", get(stats_handler))
        .with_state(state)
}

pub(crate) async fn stats_handler(
    State(state): State<DashboardApi>,
    headers: HeaderMap,
) -> Result<Json<DashboardStats>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    Ok(Json(state.service.stats(&actor)?))
}
