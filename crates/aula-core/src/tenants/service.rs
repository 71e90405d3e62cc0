use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{CreateTenantRequest, SubscriptionPlan, Tenant, TenantStatus, UpdateTenantRequest};
use super::repository::TenantRepository;
use crate::domain::{Actor, Role, TenantId};
use crate::error::ServiceError;

pub struct TenantService {
    tenants: Arc<dyn TenantRepository>,
}

impl TenantService {
    pub fn new(tenants: Arc<dyn TenantRepository>) -> Self {
        Self { tenants }
    }

    pub fn create(&self, actor: &Actor, request: CreateTenantRequest) -> Result<Tenant, ServiceError> {
        if !matches!(actor.role, Role::GlobalAdmin | Role::TenantAdmin) {
            return Err(ServiceError::Forbidden(
                "only administrators can create schools".to_string(),
            ));
        }

        let tenant = Tenant {
            id: TenantId::generate(),
            name: request.name,
            tax_id: request.tax_id,
            address: request.address,
            city: request.city,
            phone: request.phone,
            official_email: request.official_email,
            director: request.director,
            status: TenantStatus::Active,
            plan: request.plan.unwrap_or(SubscriptionPlan::Free),
            expires_on: request.expires_on,
            created_at: Utc::now(),
        };

        let stored = self.tenants.insert(tenant)?;
        info!(school = %stored.name, "school registered");
        Ok(stored)
    }

    /// Global admins see every school; everyone else sees only the school
    /// on their own account.
    pub fn list(&self, actor: &Actor) -> Result<Vec<Tenant>, ServiceError> {
        if actor.role == Role::GlobalAdmin {
            return Ok(self.tenants.list_all()?);
        }

        match &actor.tenant_id {
            Some(id) => Ok(self.tenants.find(id)?.into_iter().collect()),
            None => Ok(Vec::new()),
        }
    }

    pub fn update(
        &self,
        actor: &Actor,
        id: &TenantId,
        patch: UpdateTenantRequest,
    ) -> Result<Tenant, ServiceError> {
        match actor.role {
            Role::GlobalAdmin => {}
            Role::TenantAdmin if actor.tenant_id.as_ref() == Some(id) => {}
            _ => {
                return Err(ServiceError::Forbidden(
                    "cannot modify another school".to_string(),
                ))
            }
        }

        let mut tenant = self
            .tenants
            .find(id)?
            .ok_or(ServiceError::NotFound("school"))?;

        if let Some(name) = patch.name {
            tenant.name = name;
        }
        if let Some(tax_id) = patch.tax_id {
            tenant.tax_id = Some(tax_id);
        }
        if let Some(address) = patch.address {
            tenant.address = Some(address);
        }
        if let Some(city) = patch.city {
            tenant.city = Some(city);
        }
        if let Some(phone) = patch.phone {
            tenant.phone = Some(phone);
        }
        if let Some(official_email) = patch.official_email {
            tenant.official_email = Some(official_email);
        }
        if let Some(director) = patch.director {
            tenant.director = Some(director);
        }
        if let Some(status) = patch.status {
            tenant.status = status;
        }
        if let Some(plan) = patch.plan {
            tenant.plan = plan;
        }
        if let Some(expires_on) = patch.expires_on {
            tenant.expires_on = Some(expires_on);
        }

        self.tenants.update(tenant.clone())?;
        Ok(tenant)
    }
}
