use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Role, TenantId};

/// Identity record. Never serialized to clients directly; use
/// [`AccountView`] for responses so the credential hash stays internal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub full_name: String,
    pub tenant_id: Option<TenantId>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role,
            full_name: self.full_name.clone(),
            is_active: self.is_active,
            tenant_id: self.tenant_id.clone(),
        }
    }
}

/// Sanitized account representation for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: AccountId,
    pub email: String,
    pub role: Role,
    pub full_name: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub full_name: String,
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: AccountView,
}
