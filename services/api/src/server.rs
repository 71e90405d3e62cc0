use std::sync::atomic::Ordering;
use std::sync::Arc;

use aula_core::accounts::AccountService;
use aula_core::activities::ActivityService;
use aula_core::auth::{Authenticator, TokenSigner};
use aula_core::config::AppConfig;
use aula_core::dashboard::DashboardService;
use aula_core::enrollments::EnrollmentService;
use aula_core::error::AppError;
use aula_core::notifications::NotificationService;
use aula_core::payments::PaymentService;
use aula_core::students::StudentService;
use aula_core::telemetry;
use aula_core::tenants::TenantService;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryAccounts, InMemoryActivities, InMemoryEnrollments, InMemoryNotifications,
    InMemoryPayments, InMemoryStudents, InMemoryTenants,
};
use crate::routes::{with_api_routes, Services};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let accounts = Arc::new(InMemoryAccounts::default());
    let tenants = Arc::new(InMemoryTenants::default());
    let students = Arc::new(InMemoryStudents::default());
    let activities = Arc::new(InMemoryActivities::default());
    let enrollments = Arc::new(InMemoryEnrollments::default());
    let payments = Arc::new(InMemoryPayments::default());
    let notifications = Arc::new(InMemoryNotifications::default());

    let signer = TokenSigner::new(&config.auth);
    let auth = Arc::new(Authenticator::new(accounts.clone(), signer.clone()));

    let services = Services {
        accounts: Arc::new(AccountService::new(accounts, signer)),
        tenants: Arc::new(TenantService::new(tenants)),
        students: Arc::new(StudentService::new(students.clone())),
        activities: Arc::new(ActivityService::new(activities.clone())),
        enrollments: Arc::new(EnrollmentService::new(
            students.clone(),
            activities.clone(),
            enrollments.clone(),
            notifications.clone(),
        )),
        payments: Arc::new(PaymentService::new(
            enrollments.clone(),
            activities.clone(),
            payments,
            notifications.clone(),
        )),
        notifications: Arc::new(NotificationService::new(notifications)),
        dashboard: Arc::new(DashboardService::new(students, activities, enrollments)),
    };

    let app = with_api_routes(auth, services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "school activities api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
