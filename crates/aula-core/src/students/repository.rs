use super::domain::StudentRecord;
use crate::domain::{AccountId, StudentId, TenantId};
use crate::error::RepositoryError;

pub trait StudentRepository: Send + Sync {
    fn insert(&self, student: StudentRecord) -> Result<StudentRecord, RepositoryError>;
    fn find(&self, id: &StudentId) -> Result<Option<StudentRecord>, RepositoryError>;
    fn list_by_parent(&self, parent: &AccountId) -> Result<Vec<StudentRecord>, RepositoryError>;
    fn list_by_tenant(&self, tenant: &TenantId) -> Result<Vec<StudentRecord>, RepositoryError>;
}
