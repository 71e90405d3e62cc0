use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use super::domain::{CreatePaymentRequest, Payment};
use super::service::PaymentService;
use crate::auth::Authenticator;
use crate::domain::PaymentId;
use crate::error::ServiceError;

#[derive(Clone)]
pub struct PaymentsApi {
    pub auth: Arc<Authenticator>,
    pub service: Arc<PaymentService>,
}

pub fn payment_router(state: PaymentsApi) -> Router {
    Router::new()
        .route("/api/v1/payments", post(create_handler).get(list_handler))
        .route(
            "/api/v1/payments/:payment_id/confirm",
            post(confirm_handler),
        )
        .with_state(state)
}

pub(crate) async fn create_handler(
    State(state): State<PaymentsApi>,
    headers: HeaderMap,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    let payment = state.service.create_payment(&actor, payload)?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub(crate) async fn confirm_handler(
    State(state): State<PaymentsApi>,
    headers: HeaderMap,
    Path(payment_id): Path<String>,
) -> Result<Json<Payment>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    let payment = state
        .service
        .confirm_payment(&actor, &PaymentId(payment_id))?;
    Ok(Json(payment))
}

pub(crate) async fn list_handler(
    State(state): State<PaymentsApi>,
    headers: HeaderMap,
) -> Result<Json<Vec<Payment>>, ServiceError> {
    let actor = state.auth.authenticate(&headers)?;
    Ok(Json(state.service.list(&actor)?))
}
