use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Request;
use axum::response::Response;
use chrono::{Duration, Utc};
use serde_json::Value;

use crate::accounts::domain::Account;
use crate::accounts::repository::AccountRepository;
use crate::activities::domain::{Activity, ActivityStatus, Visibility};
use crate::activities::repository::ActivityRepository;
use crate::auth::{Authenticator, TokenSigner};
use crate::config::AuthConfig;
use crate::domain::{
    AccountId, ActivityId, Actor, EnrollmentId, NotificationId, PaymentId, PaymentMethod, Role,
    StudentId, TenantId,
};
use crate::enrollments::domain::{Enrollment, EnrollmentStatus};
use crate::enrollments::repository::EnrollmentRepository;
use crate::error::RepositoryError;
use crate::notifications::domain::Notification;
use crate::notifications::repository::NotificationRepository;
use crate::payments::domain::{CreatePaymentRequest, Payment};
use crate::payments::repository::PaymentRepository;
use crate::payments::router::PaymentsApi;
use crate::payments::{payment_router, PaymentService};

pub(super) struct Ledger {
    pub(super) tenant: TenantId,
    pub(super) activities: Arc<MemoryActivities>,
    pub(super) enrollments: Arc<MemoryEnrollments>,
    pub(super) payments: Arc<MemoryPayments>,
    pub(super) notifications: Arc<MemoryNotifications>,
    pub(super) service: Arc<PaymentService>,
}

pub(super) fn build_ledger() -> Ledger {
    let tenant = TenantId::generate();
    let activities = Arc::new(MemoryActivities::default());
    let enrollments = Arc::new(MemoryEnrollments::default());
    let payments = Arc::new(MemoryPayments::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = Arc::new(PaymentService::new(
        enrollments.clone(),
        activities.clone(),
        payments.clone(),
        notifications.clone(),
    ));
    Ledger {
        tenant,
        activities,
        enrollments,
        payments,
        notifications,
        service,
    }
}

impl Ledger {
    pub(super) fn parent_actor(&self) -> Actor {
        Actor {
            account_id: AccountId::generate(),
            role: Role::Parent,
            tenant_id: Some(self.tenant.clone()),
        }
    }

    pub(super) fn admin_actor(&self) -> Actor {
        Actor {
            account_id: AccountId::generate(),
            role: Role::TenantAdmin,
            tenant_id: Some(self.tenant.clone()),
        }
    }

    pub(super) fn foreign_admin_actor(&self) -> Actor {
        Actor {
            account_id: AccountId::generate(),
            role: Role::TenantAdmin,
            tenant_id: Some(TenantId::generate()),
        }
    }

    pub(super) fn seed_activity(&self, price: f64) -> Activity {
        let now = Utc::now();
        let activity = Activity {
            id: ActivityId::generate(),
            name: "Robotics Workshop".to_string(),
            description: None,
            starts_at: now + Duration::days(14),
            ends_at: now + Duration::days(14) + Duration::hours(3),
            tenant_id: self.tenant.clone(),
            cohorts: vec!["5B".to_string()],
            capacity: None,
            price,
            materials: Vec::new(),
            visibility: Visibility::Internal,
            status: ActivityStatus::Confirmed,
            coordinator: None,
            payment_methods: vec![
                PaymentMethod::Card,
                PaymentMethod::Transfer,
                PaymentMethod::Cash,
            ],
            permanent: false,
            signup_link: None,
            manual_validation: false,
            created_at: now,
            updated_at: now,
        };
        self.activities
            .insert(activity.clone())
            .expect("activity inserts");
        activity
    }

    pub(super) fn seed_enrollment(&self, parent: &Actor, activity: &Activity) -> Enrollment {
        let enrollment = Enrollment {
            id: EnrollmentId::generate(),
            activity_id: activity.id.clone(),
            student_id: StudentId::generate(),
            parent_id: parent.account_id.clone(),
            tenant_id: self.tenant.clone(),
            status: if activity.price > 0.0 {
                EnrollmentStatus::PaymentPending
            } else {
                EnrollmentStatus::Confirmed
            },
            paid_amount: 0.0,
            payment_method_used: None,
            paid_at: None,
            comments: None,
            created_at: Utc::now(),
        };
        self.enrollments
            .insert(enrollment.clone())
            .expect("enrollment inserts");
        enrollment
    }

    pub(super) fn stored_enrollment(&self, id: &EnrollmentId) -> Enrollment {
        self.enrollments
            .find(id)
            .expect("enrollment lookup")
            .expect("enrollment exists")
    }
}

pub(super) fn payment_request(
    enrollment: &Enrollment,
    method: PaymentMethod,
) -> CreatePaymentRequest {
    CreatePaymentRequest {
        enrollment_id: enrollment.id.clone(),
        method,
        method_payload: None,
        notes: None,
    }
}

#[derive(Default)]
pub(super) struct MemoryActivities {
    records: Mutex<HashMap<ActivityId, Activity>>,
}

impl ActivityRepository for MemoryActivities {
    fn insert(&self, activity: Activity) -> Result<Activity, RepositoryError> {
        let mut guard = self.records.lock().expect("activity mutex poisoned");
        guard.insert(activity.id.clone(), activity.clone());
        Ok(activity)
    }

    fn find(&self, id: &ActivityId) -> Result<Option<Activity>, RepositoryError> {
        let guard = self.records.lock().expect("activity mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, activity: Activity) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("activity mutex poisoned");
        guard.insert(activity.id.clone(), activity);
        Ok(())
    }

    fn delete(&self, id: &ActivityId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("activity mutex poisoned");
        guard.remove(id);
        Ok(())
    }

    fn list_by_tenant(&self, tenant: &TenantId) -> Result<Vec<Activity>, RepositoryError> {
        let guard = self.records.lock().expect("activity mutex poisoned");
        Ok(guard
            .values()
            .filter(|activity| activity.tenant_id == *tenant)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryEnrollments {
    records: Mutex<HashMap<EnrollmentId, Enrollment>>,
}

impl EnrollmentRepository for MemoryEnrollments {
    fn insert(&self, enrollment: Enrollment) -> Result<Enrollment, RepositoryError> {
        let mut guard = self.records.lock().expect("enrollment mutex poisoned");
        let duplicate = guard.values().any(|existing| {
            existing.activity_id == enrollment.activity_id
                && existing.student_id == enrollment.student_id
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(enrollment.id.clone(), enrollment.clone());
        Ok(enrollment)
    }

    fn find(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, RepositoryError> {
        let guard = self.records.lock().expect("enrollment mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, enrollment: Enrollment) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("enrollment mutex poisoned");
        guard.insert(enrollment.id.clone(), enrollment);
        Ok(())
    }

    fn find_pair(
        &self,
        activity: &ActivityId,
        student: &StudentId,
    ) -> Result<Option<Enrollment>, RepositoryError> {
        let guard = self.records.lock().expect("enrollment mutex poisoned");
        Ok(guard
            .values()
            .find(|existing| existing.activity_id == *activity && existing.student_id == *student)
            .cloned())
    }

    fn count_seats_taken(&self, activity: &ActivityId) -> Result<usize, RepositoryError> {
        let guard = self.records.lock().expect("enrollment mutex poisoned");
        Ok(guard
            .values()
            .filter(|existing| existing.activity_id == *activity && existing.status.occupies_seat())
            .count())
    }

    fn list_by_parent(&self, parent: &AccountId) -> Result<Vec<Enrollment>, RepositoryError> {
        let guard = self.records.lock().expect("enrollment mutex poisoned");
        Ok(guard
            .values()
            .filter(|existing| existing.parent_id == *parent)
            .cloned()
            .collect())
    }

    fn list_by_tenant(&self, tenant: &TenantId) -> Result<Vec<Enrollment>, RepositoryError> {
        let guard = self.records.lock().expect("enrollment mutex poisoned");
        Ok(guard
            .values()
            .filter(|existing| existing.tenant_id == *tenant)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryPayments {
    records: Mutex<HashMap<PaymentId, Payment>>,
}

impl PaymentRepository for MemoryPayments {
    fn insert(&self, payment: Payment) -> Result<Payment, RepositoryError> {
        let mut guard = self.records.lock().expect("payment mutex poisoned");
        let duplicate = guard
            .values()
            .any(|existing| existing.enrollment_id == payment.enrollment_id);
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(payment.id.clone(), payment.clone());
        Ok(payment)
    }

    fn find(&self, id: &PaymentId) -> Result<Option<Payment>, RepositoryError> {
        let guard = self.records.lock().expect("payment mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, payment: Payment) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("payment mutex poisoned");
        guard.insert(payment.id.clone(), payment);
        Ok(())
    }

    fn find_by_enrollment(
        &self,
        enrollment: &EnrollmentId,
    ) -> Result<Option<Payment>, RepositoryError> {
        let guard = self.records.lock().expect("payment mutex poisoned");
        Ok(guard
            .values()
            .find(|existing| existing.enrollment_id == *enrollment)
            .cloned())
    }

    fn list_by_parent(&self, parent: &AccountId) -> Result<Vec<Payment>, RepositoryError> {
        let guard = self.records.lock().expect("payment mutex poisoned");
        Ok(guard
            .values()
            .filter(|existing| existing.parent_id == *parent)
            .cloned()
            .collect())
    }

    fn list_by_enrollments(
        &self,
        enrollments: &[EnrollmentId],
    ) -> Result<Vec<Payment>, RepositoryError> {
        let guard = self.records.lock().expect("payment mutex poisoned");
        Ok(guard
            .values()
            .filter(|existing| enrollments.contains(&existing.enrollment_id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifications {
    records: Mutex<Vec<Notification>>,
}

impl MemoryNotifications {
    pub(super) fn records(&self) -> Vec<Notification> {
        self.records
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

impl NotificationRepository for MemoryNotifications {
    fn append(&self, notification: Notification) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }

    fn find(&self, id: &NotificationId) -> Result<Option<Notification>, RepositoryError> {
        let guard = self.records.lock().expect("notification mutex poisoned");
        Ok(guard.iter().find(|n| n.id == *id).cloned())
    }

    fn list_for(&self, recipient: &AccountId) -> Result<Vec<Notification>, RepositoryError> {
        let guard = self.records.lock().expect("notification mutex poisoned");
        Ok(guard
            .iter()
            .filter(|n| n.recipient_id == *recipient)
            .cloned()
            .collect())
    }

    fn update(&self, notification: Notification) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("notification mutex poisoned");
        if let Some(slot) = guard.iter_mut().find(|n| n.id == notification.id) {
            *slot = notification;
        }
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryAccounts {
    records: Mutex<HashMap<AccountId, Account>>,
}

impl AccountRepository for MemoryAccounts {
    fn insert(&self, account: Account) -> Result<Account, RepositoryError> {
        let mut guard = self.records.lock().expect("account mutex poisoned");
        guard.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        let guard = self.records.lock().expect("account mutex poisoned");
        Ok(guard.values().find(|a| a.email == email).cloned())
    }

    fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        let guard = self.records.lock().expect("account mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, account: Account) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("account mutex poisoned");
        guard.insert(account.id.clone(), account);
        Ok(())
    }
}

pub(super) struct Api {
    pub(super) router: axum::Router,
    pub(super) ledger: Ledger,
    pub(super) parent: Account,
    pub(super) parent_token: String,
    pub(super) admin_token: String,
}

pub(super) fn build_api() -> Api {
    let ledger = build_ledger();
    let accounts = Arc::new(MemoryAccounts::default());
    let signer = TokenSigner::new(&AuthConfig {
        jwt_secret: "payment-route-secret".to_string(),
        token_ttl_seconds: 3600,
    });

    let parent = Account {
        id: AccountId::generate(),
        email: "parent@example.com".to_string(),
        password_hash: "unused".to_string(),
        role: Role::Parent,
        is_active: true,
        full_name: "Test Parent".to_string(),
        tenant_id: Some(ledger.tenant.clone()),
        created_at: Utc::now(),
    };
    let admin = Account {
        id: AccountId::generate(),
        email: "admin@example.com".to_string(),
        password_hash: "unused".to_string(),
        role: Role::TenantAdmin,
        is_active: true,
        full_name: "Test Admin".to_string(),
        tenant_id: Some(ledger.tenant.clone()),
        created_at: Utc::now(),
    };
    accounts.insert(parent.clone()).expect("account inserts");
    accounts.insert(admin.clone()).expect("account inserts");

    let parent_token = signer
        .issue(&parent.id, parent.role, parent.tenant_id.as_ref())
        .expect("token issues");
    let admin_token = signer
        .issue(&admin.id, admin.role, admin.tenant_id.as_ref())
        .expect("token issues");

    let auth = Arc::new(Authenticator::new(accounts, signer));
    let router = payment_router(PaymentsApi {
        auth,
        service: ledger.service.clone(),
    });

    Api {
        router,
        ledger,
        parent,
        parent_token,
        admin_token,
    }
}

impl Api {
    pub(super) fn parent_actor(&self) -> Actor {
        Actor {
            account_id: self.parent.id.clone(),
            role: self.parent.role,
            tenant_id: self.parent.tenant_id.clone(),
        }
    }
}

pub(super) fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::post(uri).header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).expect("json payload")))
        .expect("valid request")
}

pub(super) fn post_empty(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("valid request")
}

pub(super) fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("valid request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
