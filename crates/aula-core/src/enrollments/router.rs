use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use super::domain::{EnrollRequest, Enrollment};
use super::service::EnrollmentService;
use crate::auth::Authenticator;
use crate::error::ServiceError;

#[derive(Clone)]
pub struct EnrollmentsApi {
    pub auth: Arc<Authenticator>,
    pub service: Arc<EnrollmentService>,
}

pub fn enrollment_router(state: EnrollmentsApi) -> Router {
    Router::new()
        .route(
            "/api/v1/enrollments",
            post(enroll_handler).get(list_handler),
        )
        .with_state(state)
}

pub(crate) async fn enroll_handler(
    State(state): State<EnrollmentsApi>,
    headers: HeaderMap,
    Json(payload): Json<EnrollRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    let enrollment = state.service.enroll(&actor, payload)?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

pub(crate) async fn list_handler(
    State(state): State<EnrollmentsApi>,
    headers: HeaderMap,
) -> Result<Json<Vec<Enrollment>>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    Ok(Json(state.service.list(&actor)?))
}
