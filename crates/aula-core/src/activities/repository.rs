use super::domain::Activity;
use crate::domain::{ActivityId, TenantId};
use crate::error::RepositoryError;

pub trait ActivityRepository: Send + Sync {
    fn insert(&self, activity: Activity) -> Result<Activity, RepositoryError>;
    fn find(&self, id: &ActivityId) -> Result<Option<Activity>, RepositoryError>;
    fn update(&self, activity: Activity) -> Result<(), RepositoryError>;
    fn delete(&self, id: &ActivityId) -> Result<(), RepositoryError>;
    fn list_by_tenant(&self, tenant: &TenantId) -> Result<Vec<Activity>, RepositoryError>;
}
