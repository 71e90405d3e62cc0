use super::domain::Account;
use crate::domain::AccountId;
use crate::error::RepositoryError;

/// Storage abstraction for identity records. `insert` must reject a
/// duplicate email with [`RepositoryError::Conflict`]; that uniqueness
/// guarantee lives in the storage layer, not in the service's pre-check.
pub trait AccountRepository: Send + Sync {
    fn insert(&self, account: Account) -> Result<Account, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError>;
    fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError>;
    fn update(&self, account: Account) -> Result<(), RepositoryError>;
}
