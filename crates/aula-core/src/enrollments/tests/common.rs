use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Request;
use axum::response::Response;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::Value;

use crate::accounts::domain::Account;
use crate::accounts::repository::AccountRepository;
use crate::activities::domain::{Activity, ActivityStatus, Visibility};
use crate::activities::repository::ActivityRepository;
use crate::auth::{Authenticator, TokenSigner};
use crate::config::AuthConfig;
use crate::domain::{
    AccountId, ActivityId, Actor, EnrollmentId, NotificationId, PaymentMethod, Role, StudentId,
    TenantId,
};
use crate::enrollments::domain::{EnrollRequest, Enrollment};
use crate::enrollments::repository::EnrollmentRepository;
use crate::enrollments::router::EnrollmentsApi;
use crate::enrollments::{enrollment_router, EnrollmentService};
use crate::error::RepositoryError;
use crate::notifications::domain::Notification;
use crate::notifications::repository::NotificationRepository;
use crate::students::domain::StudentRecord;
use crate::students::repository::StudentRepository;

pub(super) struct Ledger {
    pub(super) tenant: TenantId,
    pub(super) students: Arc<MemoryStudents>,
    pub(super) activities: Arc<MemoryActivities>,
    pub(super) enrollments: Arc<MemoryEnrollments>,
    pub(super) notifications: Arc<MemoryNotifications>,
    pub(super) service: Arc<EnrollmentService>,
}

pub(super) fn build_ledger() -> Ledger {
    let tenant = TenantId::generate();
    let students = Arc::new(MemoryStudents::default());
    let activities = Arc::new(MemoryActivities::default());
    let enrollments = Arc::new(MemoryEnrollments::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = Arc::new(EnrollmentService::new(
        students.clone(),
        activities.clone(),
        enrollments.clone(),
        notifications.clone(),
    ));
    Ledger {
        tenant,
        students,
        activities,
        enrollments,
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

    pub(super) fn seed_student(&self, parent: &Actor) -> StudentRecord {
        let record = StudentRecord {
            id: StudentId::generate(),
            full_name: "Lucia Fernandez".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2016, 3, 12).expect("valid date"),
            grade: "3A".to_string(),
            tenant_id: self.tenant.clone(),
            parent_id: Some(parent.account_id.clone()),
            created_at: Utc::now(),
        };
        self.students.insert(record.clone()).expect("student inserts");
        record
    }

    pub(super) fn seed_activity(&self, price: f64, capacity: Option<u32>) -> Activity {
        let now = Utc::now();
        let activity = Activity {
            id: ActivityId::generate(),
            name: "Chess Club".to_string(),
            description: None,
            starts_at: now + Duration::days(7),
            ends_at: now + Duration::days(7) + Duration::hours(2),
            tenant_id: self.tenant.clone(),
            cohorts: vec!["3A".to_string()],
            capacity,
            price,
            materials: Vec::new(),
            visibility: Visibility::Internal,
            status: ActivityStatus::Confirmed,
            coordinator: None,
            payment_methods: vec![PaymentMethod::Card, PaymentMethod::Transfer],
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
}

pub(super) fn enroll_request(activity: &Activity, student: &StudentRecord) -> EnrollRequest {
    EnrollRequest {
        activity_id: activity.id.clone(),
        student_id: student.id.clone(),
        comments: None,
    }
}

#[derive(Default)]
pub(super) struct MemoryStudents {
    records: Mutex<HashMap<StudentId, StudentRecord>>,
}

impl StudentRepository for MemoryStudents {
    fn insert(&self, student: StudentRecord) -> Result<StudentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("student mutex poisoned");
        guard.insert(student.id.clone(), student.clone());
        Ok(student)
    }

    fn find(&self, id: &StudentId) -> Result<Option<StudentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("student mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_by_parent(&self, parent: &AccountId) -> Result<Vec<StudentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("student mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.parent_id.as_ref() == Some(parent))
            .cloned()
            .collect())
    }

    fn list_by_tenant(&self, tenant: &TenantId) -> Result<Vec<StudentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("student mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.tenant_id == *tenant)
            .cloned()
            .collect())
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

/// Passes the service pre-checks, then fails the write the way a storage
/// backend does when a concurrent insert won the race.
pub(super) struct ConflictEnrollments;

impl EnrollmentRepository for ConflictEnrollments {
    fn insert(&self, _enrollment: Enrollment) -> Result<Enrollment, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn find(&self, _id: &EnrollmentId) -> Result<Option<Enrollment>, RepositoryError> {
        Ok(None)
    }

    fn update(&self, _enrollment: Enrollment) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn find_pair(
        &self,
        _activity: &ActivityId,
        _student: &StudentId,
    ) -> Result<Option<Enrollment>, RepositoryError> {
        Ok(None)
    }

    fn count_seats_taken(&self, _activity: &ActivityId) -> Result<usize, RepositoryError> {
        Ok(0)
    }

    fn list_by_parent(&self, _parent: &AccountId) -> Result<Vec<Enrollment>, RepositoryError> {
        Ok(Vec::new())
    }

    fn list_by_tenant(&self, _tenant: &TenantId) -> Result<Vec<Enrollment>, RepositoryError> {
        Ok(Vec::new())
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
    pub(super) token: String,
}

pub(super) fn build_api() -> Api {
    let ledger = build_ledger();
    let accounts = Arc::new(MemoryAccounts::default());
    let signer = TokenSigner::new(&AuthConfig {
        jwt_secret: "enrollment-route-secret".to_string(),
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
    accounts.insert(parent.clone()).expect("account inserts");
    let token = signer
        .issue(&parent.id, parent.role, parent.tenant_id.as_ref())
        .expect("token issues");

    let auth = Arc::new(Authenticator::new(accounts, signer));
    let router = enrollment_router(EnrollmentsApi {
        auth,
        service: ledger.service.clone(),
    });

    Api {
        router,
        ledger,
        parent,
        token,
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
