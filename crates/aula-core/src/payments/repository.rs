use super::domain::Payment;
use crate::domain::{AccountId, EnrollmentId, PaymentId};
use crate::error::RepositoryError;

/// Storage abstraction for the payment ledger.
///
/// `insert` must reject a second payment for the same enrollment with
/// [`RepositoryError::Conflict`], atomically with the write — the same
/// storage-layer uniqueness strategy as the enrollment ledger.
pub trait PaymentRepository: Send + Sync {
    fn insert(&self, payment: Payment) -> Result<Payment, RepositoryError>;
    fn find(&self, id: &PaymentId) -> Result<Option<Payment>, RepositoryError>;
    fn update(&self, payment: Payment) -> Result<(), RepositoryError>;
    fn find_by_enrollment(
        &self,
        enrollment: &EnrollmentId,
    ) -> Result<Option<Payment>, RepositoryError>;
    fn list_by_parent(&self, parent: &AccountId) -> Result<Vec<Payment>, RepositoryError>;
    fn list_by_enrollments(
        &self,
        enrollments: &[EnrollmentId],
    ) -> Result<Vec<Payment>, RepositoryError>;
}
