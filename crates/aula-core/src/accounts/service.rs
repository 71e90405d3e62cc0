use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{Account, AccountView, LoginRequest, LoginResponse, RegisterRequest};
use super::repository::AccountRepository;
use crate::auth::{passwords, TokenSigner};
use crate::domain::{AccountId, Actor};
use crate::error::{RepositoryError, ServiceError};

/// Registration, login, and account lookup.
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    tokens: TokenSigner,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountRepository>, tokens: TokenSigner) -> Self {
        Self { accounts, tokens }
    }

    pub fn register(&self, request: RegisterRequest) -> Result<AccountView, ServiceError> {
        let password_hash = passwords::hash(&request.password)?;
        let account = Account {
            id: AccountId::generate(),
            email: request.email,
            password_hash,
            role: request.role,
            is_active: true,
            full_name: request.full_name,
            tenant_id: request.tenant_id,
            created_at: Utc::now(),
        };

        let stored = self.accounts.insert(account).map_err(|err| match err {
            RepositoryError::Conflict => ServiceError::Conflict("email already registered"),
            other => ServiceError::Repository(other),
        })?;

        info!(email = %stored.email, role = stored.role.label(), "account registered");
        Ok(stored.view())
    }

    pub fn login(&self, request: LoginRequest) -> Result<LoginResponse, ServiceError> {
        let account = self
            .accounts
            .find_by_email(&request.email)?
            .ok_or_else(|| ServiceError::Unauthenticated("invalid credentials".to_string()))?;

        if !passwords::verify(&request.password, &account.password_hash)? {
            return Err(ServiceError::Unauthenticated(
                "invalid credentials".to_string(),
            ));
        }

        if !account.is_active {
            return Err(ServiceError::Unauthenticated(
                "account is disabled".to_string(),
            ));
        }

        let access_token = self
            .tokens
            .issue(&account.id, account.role, account.tenant_id.as_ref())?;

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: account.view(),
        })
    }

    pub fn current(&self, actor: &Actor) -> Result<AccountView, ServiceError> {
        let account = self
            .accounts
            .find_by_id(&actor.account_id)?
            .ok_or(ServiceError::NotFound("account"))?;
        Ok(account.view())
    }
}
