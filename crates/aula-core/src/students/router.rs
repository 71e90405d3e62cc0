use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use super::domain::{CreateStudentRequest, StudentRecord};
use super::service::StudentService;
use crate::auth::Authenticator;
use crate::error::ServiceError;

#[derive(Clone)]
pub struct StudentsApi {
    pub auth: Arc<Authenticator>,
    pub service: Arc<StudentService>,
}

pub fn student_router(state: StudentsApi) -> Router {
    Router::new()
        .route("/api/v1/students", post(create_handler).get(list_handler))
        .with_state(state)
}

pub(crate) async fn create_handler(
    State(state): State<StudentsApi>,
    headers: HeaderMap,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    let student = state.service.create(&actor, payload)?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub(crate) async fn list_handler(
    State(state): State<StudentsApi>,
    headers: HeaderMap,
) -> Result<Json<Vec<StudentRecord>>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    Ok(Json(state.service.list(&actor)?))
}
