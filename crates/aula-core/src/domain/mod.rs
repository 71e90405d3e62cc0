//! Identifiers and actor types shared by every feature module.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

id_type!(AccountId);
id_type!(
    /// Identifier of a school, the top-level scoping boundary for all data.
    TenantId
);
id_type!(StudentId);
id_type!(ActivityId);
id_type!(EnrollmentId);
id_type!(PaymentId);
id_type!(NotificationId);

/// Closed role set; every authorization decision branches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    GlobalAdmin,
    TenantAdmin,
    Parent,
    Student,
    Teacher,
    Vendor,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::GlobalAdmin => "global_admin",
            Role::TenantAdmin => "tenant_admin",
            Role::Parent => "parent",
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Vendor => "vendor",
        }
    }
}

/// Settlement channels an activity may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Transfer,
    Cash,
}

impl PaymentMethod {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Cash => "cash",
        }
    }
}

/// The authenticated principal behind a request, resolved from a bearer
/// token by the [`crate::auth::Authenticator`] and handed to every service
/// operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub account_id: AccountId,
    pub role: Role,
    pub tenant_id: Option<TenantId>,
}

impl Actor {
    /// Tenant the actor belongs to, or a scope failure for roles that are
    /// expected to carry one.
    pub fn require_tenant(&self) -> Result<&TenantId, crate::error::ServiceError> {
        self.tenant_id
            .as_ref()
            .ok_or_else(|| crate::error::ServiceError::Forbidden("no school assigned".to_string()))
    }
}
