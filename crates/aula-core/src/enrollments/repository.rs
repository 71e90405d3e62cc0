use super::domain::Enrollment;
use crate::domain::{AccountId, ActivityId, EnrollmentId, StudentId, TenantId};
use crate::error::RepositoryError;

/// Storage abstraction for the enrollment ledger.
///
/// `insert` must reject a second record for the same (activity, student)
/// pair with [`RepositoryError::Conflict`], atomically with the write.
/// Pushing the uniqueness guarantee into the storage layer closes the
/// duplicate-enrollment race that a service-level pre-check alone would
/// leave open. The capacity count stays a plain read: capacity remains a
/// best-effort soft limit under concurrency.
pub trait EnrollmentRepository: Send + Sync {
    fn insert(&self, enrollment: Enrollment) -> Result<Enrollment, RepositoryError>;
    fn find(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, RepositoryError>;
    fn update(&self, enrollment: Enrollment) -> Result<(), RepositoryError>;
    fn find_pair(
        &self,
        activity: &ActivityId,
        student: &StudentId,
    ) -> Result<Option<Enrollment>, RepositoryError>;
    /// Count of enrollments currently occupying a seat for the activity.
    fn count_seats_taken(&self, activity: &ActivityId) -> Result<usize, RepositoryError>;
    fn list_by_parent(&self, parent: &AccountId) -> Result<Vec<Enrollment>, RepositoryError>;
    fn list_by_tenant(&self, tenant: &TenantId) -> Result<Vec<Enrollment>, RepositoryError>;
}
