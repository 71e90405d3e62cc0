//! School registry: tenant records and subscription metadata.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{CreateTenantRequest, SubscriptionPlan, Tenant, TenantStatus, UpdateTenantRequest};
pub use repository::TenantRepository;
pub use router::{tenant_router, TenantsApi};
pub use service::TenantService;
