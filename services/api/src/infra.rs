use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use aula_core::accounts::{Account, AccountRepository};
use aula_core::activities::{Activity, ActivityRepository};
use aula_core::domain::{
    AccountId, ActivityId, EnrollmentId, NotificationId, PaymentId, StudentId, TenantId,
};
use aula_core::enrollments::{Enrollment, EnrollmentRepository};
use aula_core::error::RepositoryError;
use aula_core::notifications::{Notification, NotificationRepository};
use aula_core::payments::{Payment, PaymentRepository};
use aula_core::students::{StudentRecord, StudentRepository};
use aula_core::tenants::{Tenant, TenantRepository};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAccounts {
    records: Arc<Mutex<HashMap<AccountId, Account>>>,
}

impl AccountRepository for InMemoryAccounts {
    fn insert(&self, account: Account) -> Result<Account, RepositoryError> {
        let mut guard = self.records.lock().expect("account mutex poisoned");
        if guard.values().any(|existing| existing.email == account.email) {
            return Err(RepositoryError::Conflict);
        }
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
        if guard.contains_key(&account.id) {
            guard.insert(account.id.clone(), account);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTenants {
    records: Arc<Mutex<HashMap<TenantId, Tenant>>>,
}

impl TenantRepository for InMemoryTenants {
    fn insert(&self, tenant: Tenant) -> Result<Tenant, RepositoryError> {
        let mut guard = self.records.lock().expect("tenant mutex poisoned");
        guard.insert(tenant.id.clone(), tenant.clone());
        Ok(tenant)
    }

    fn find(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError> {
        let guard = self.records.lock().expect("tenant mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, tenant: Tenant) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("tenant mutex poisoned");
        if guard.contains_key(&tenant.id) {
            guard.insert(tenant.id.clone(), tenant);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn list_all(&self) -> Result<Vec<Tenant>, RepositoryError> {
        let guard = self.records.lock().expect("tenant mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryStudents {
    records: Arc<Mutex<HashMap<StudentId, StudentRecord>>>,
}

impl StudentRepository for InMemoryStudents {
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryActivities {
    records: Arc<Mutex<HashMap<ActivityId, Activity>>>,
}

impl ActivityRepository for InMemoryActivities {
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
        if guard.contains_key(&activity.id) {
            guard.insert(activity.id.clone(), activity);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn delete(&self, id: &ActivityId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("activity mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
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

/// Enrollment store. The (activity, student) uniqueness check happens
/// under the same lock as the write, which is what closes the duplicate
/// race for concurrent requests.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEnrollments {
    records: Arc<Mutex<HashMap<EnrollmentId, Enrollment>>>,
}

impl EnrollmentRepository for InMemoryEnrollments {
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
        if guard.contains_key(&enrollment.id) {
            guard.insert(enrollment.id.clone(), enrollment);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

/// Payment store. One payment per enrollment, enforced under the write
/// lock like the enrollment pair check.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPayments {
    records: Arc<Mutex<HashMap<PaymentId, Payment>>>,
}

impl PaymentRepository for InMemoryPayments {
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
        if guard.contains_key(&payment.id) {
            guard.insert(payment.id.clone(), payment);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotifications {
    records: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationRepository for InMemoryNotifications {
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
        match guard.iter_mut().find(|n| n.id == notification.id) {
            Some(slot) => {
                *slot = notification;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}
