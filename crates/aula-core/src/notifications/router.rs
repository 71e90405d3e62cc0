use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::domain::Notification;
use super::service::NotificationService;
use crate::auth::Authenticator;
use crate::domain::NotificationId;
use crate::error::ServiceError;

#[derive(Clone)]
pub struct NotificationsApi {
    pub auth: Arc<Authenticator>,
    pub service: Arc<NotificationService>,
}

pub fn notification_router(state: NotificationsApi) -> Router {
    Router::new()
        .route("/api/v1/notifications", get(list_handler))
        .route(
            "/api/v1/notifications/:notification_id/read",
            post(mark_read_handler),
        )
        .with_state(state)
}

pub(crate) async fn list_handler(
    State(state): State<NotificationsApi>,
    headers: HeaderMap,
) -> Result<Json<Vec<Notification>>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    Ok(Json(state.service.list(&actor)?))
}

pub(crate) async fn mark_read_handler(
    State(state): State<NotificationsApi>,
    headers: HeaderMap,
    Path(notification_id): Path<String>,
) -> Result<Json<Notification>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    let notification = state
        .service
        .mark_read(&actor, &NotificationId(notification_id))?;
    Ok(Json(notification))
}
