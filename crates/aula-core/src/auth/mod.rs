//! Bearer-token authentication: password hashing, token signing, and the
//! request-time resolver that turns an `Authorization` header into an
//! [`Actor`].

pub mod passwords;
pub mod tokens;

pub use passwords::PasswordError;
pub use tokens::{Claims, TokenError, TokenSigner};

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use crate::accounts::repository::AccountRepository;
use crate::domain::{AccountId, Actor};
use crate::error::ServiceError;

/// Resolves bearer credentials to an [`Actor`]. The account record is
/// re-read on every request so deactivation takes effect immediately.
pub struct Authenticator {
    accounts: Arc<dyn AccountRepository>,
    tokens: TokenSigner,
}

impl Authenticator {
    pub fn new(accounts: Arc<dyn AccountRepository>, tokens: TokenSigner) -> Self {
        Self { accounts, tokens }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Actor, ServiceError> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ServiceError::Unauthenticated("missing bearer token".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ServiceError::Unauthenticated("malformed bearer token".to_string()))?;

        let claims = self
            .tokens
            .verify(token)
            .map_err(|err| ServiceError::Unauthenticated(err.to_string()))?;

        let account = self
            .accounts
            .find_by_id(&AccountId(claims.sub))?
            .ok_or_else(|| ServiceError::Unauthenticated("account not found".to_string()))?;

        if !account.is_active {
            return Err(ServiceError::Unauthenticated(
                "account is disabled".to_string(),
            ));
        }

        Ok(Actor {
            account_id: account.id,
            role: account.role,
            tenant_id: account.tenant_id,
        })
    }
}
