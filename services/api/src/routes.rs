use std::sync::Arc;

use aula_core::accounts::{account_router, AccountService, AccountsApi};
use aula_core::activities::{activity_router, ActivitiesApi, ActivityService};
use aula_core::auth::Authenticator;
use aula_core::dashboard::{dashboard_router, DashboardApi, DashboardService};
use aula_core::enrollments::{enrollment_router, EnrollmentService, EnrollmentsApi};
use aula_core::notifications::{notification_router, NotificationService, NotificationsApi};
use aula_core::payments::{payment_router, PaymentService, PaymentsApi};
use aula_core::students::{student_router, StudentService, StudentsApi};
use aula_core::tenants::{tenant_router, TenantService, TenantsApi};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;

use crate::infra::AppState;

pub(crate) struct Services {
    pub(crate) accounts: Arc<AccountService>,
    pub(crate) tenants: Arc<TenantService>,
    pub(crate) students: Arc<StudentService>,
    pub(crate) activities: Arc<ActivityService>,
    pub(crate) enrollments: Arc<EnrollmentService>,
    pub(crate) payments: Arc<PaymentService>,
    pub(crate) notifications: Arc<NotificationService>,
    pub(crate) dashboard: Arc<DashboardService>,
}

/// One router per feature module, merged with the operational endpoints.
pub(crate) fn with_api_routes(auth: Arc<Authenticator>, services: Services) -> axum::Router {
    account_router(AccountsApi {
        auth: auth.clone(),
        service: services.accounts,
    })
    .merge(tenant_router(TenantsApi {
        auth: auth.clone(),
        service: services.tenants,
    }))
    .merge(student_router(StudentsApi {
        auth: auth.clone(),
        service: services.students,
    }))
    .merge(activity_router(ActivitiesApi {
        auth: auth.clone(),
        service: services.activities,
    }))
    .merge(enrollment_router(EnrollmentsApi {
        auth: auth.clone(),
        service: services.enrollments,
    }))
    .merge(payment_router(PaymentsApi {
        auth: auth.clone(),
        service: services.payments,
    }))
    .merge(notification_router(NotificationsApi {
        auth: auth.clone(),
        service: services.notifications,
    }))
    .merge(dashboard_router(DashboardApi {
        auth,
        service: services.dashboard,
    }))
    .route("/health", axum::routing::get(healthcheck))
    .route("/ready", axum::routing::get(readiness_endpoint))
    .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
