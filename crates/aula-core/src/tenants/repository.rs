use super::domain::Tenant;
use crate::domain::TenantId;
use crate::error::RepositoryError;

pub trait TenantRepository: Send + Sync {
    fn insert(&self, tenant: Tenant) -> Result<Tenant, RepositoryError>;
    fn find(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError>;
    fn update(&self, tenant: Tenant) -> Result<(), RepositoryError>;
    fn list_all(&self) -> Result<Vec<Tenant>, RepositoryError>;
}
