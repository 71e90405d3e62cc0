use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use super::domain::{Activity, ActivityFilter, CreateActivityRequest, UpdateActivityRequest};
use super::service::ActivityService;
use crate::auth::Authenticator;
use crate::domain::ActivityId;
use crate::error::ServiceError;

#[derive(Clone)]
pub struct ActivitiesApi {
    pub auth: Arc<Authenticator>,
    pub service: Arc<ActivityService>,
}

pub fn activity_router(state: ActivitiesApi) -> Router {
    Router::new()
        .route(
            "/api/v1/activities",
            post(create_handler).get(list_handler),
        )
        .route(
            "/api/v1/activities/:activity_id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

pub(crate) async fn create_handler(
    State(state): State<ActivitiesApi>,
    headers: HeaderMap,
    Json(payload): Json<CreateActivityRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    let activity = state.service.create(&actor, payload)?;
    Ok((StatusCode::CREATED, Json(activity)))
}

pub(crate) async fn list_handler(
    State(state): State<ActivitiesApi>,
    headers: HeaderMap,
    Query(filter): Query<ActivityFilter>,
) -> Result<Json<Vec<Activity>>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    Ok(Json(state.service.list(&actor, &filter)?))
}

pub(crate) async fn get_handler(
    State(state): State<ActivitiesApi>,
    headers: HeaderMap,
    Path(activity_id): Path<String>,
) -> Result<Json<Activity>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    Ok(Json(state.service.get(&actor, &ActivityId(activity_id))?))
}

pub(crate) async fn update_handler(
    State(state): State<ActivitiesApi>,
    headers: HeaderMap,
    Path(activity_id): Path<String>,
    Json(payload): Json<UpdateActivityRequest>,
) -> Result<Json<Activity>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    let activity = state
        .service
        .update(&actor, &ActivityId(activity_id), payload)?;
    Ok(Json(activity))
}

pub(crate) async fn delete_handler(
    State(state): State<ActivitiesApi>,
    headers: HeaderMap,
    Path(activity_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    state.service.delete(&actor, &ActivityId(activity_id))?;
    Ok(Json(json!({ "message": "activity deleted" })))
}
