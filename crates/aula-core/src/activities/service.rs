use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    Activity, ActivityFilter, ActivityStatus, CreateActivityRequest, UpdateActivityRequest,
    Visibility,
};
use super::repository::ActivityRepository;
use crate::domain::{ActivityId, Actor, Role};
use crate::error::ServiceError;

pub struct ActivityService {
    activities: Arc<dyn ActivityRepository>,
}

impl ActivityService {
    pub fn new(activities: Arc<dyn ActivityRepository>) -> Self {
        Self { activities }
    }

    /// Create a catalog entry in the actor's own school. Externally visible
    /// activities get a public signup link derived from their id.
    pub fn create(
        &self,
        actor: &Actor,
        request: CreateActivityRequest,
    ) -> Result<Activity, ServiceError> {
        if !matches!(actor.role, Role::TenantAdmin | Role::Teacher) {
            return Err(ServiceError::Forbidden(
                "only school admins and teachers can create activities".to_string(),
            ));
        }
        let tenant_id = actor.require_tenant()?.clone();

        let id = ActivityId::generate();
        let signup_link = match request.visibility {
            Visibility::External | Visibility::Mixed => Some(format!("/signup/{}", id.as_str())),
            Visibility::Internal => None,
        };

        let now = Utc::now();
        let activity = Activity {
            id,
            name: request.name,
            description: request.description,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            tenant_id,
            cohorts: request.cohorts,
            capacity: request.capacity,
            price: request.price,
            materials: request.materials,
            visibility: request.visibility,
            status: ActivityStatus::Pending,
            coordinator: request.coordinator,
            payment_methods: request.payment_methods,
            permanent: request.permanent,
            signup_link,
            manual_validation: request.manual_validation,
            created_at: now,
            updated_at: now,
        };

        let stored = self.activities.insert(activity)?;
        info!(activity = %stored.name, price = stored.price, "activity created");
        Ok(stored)
    }

    /// Catalog listing. Admins and teachers see everything in their school;
    /// parents only see activities open to students (internal or mixed).
    pub fn list(&self, actor: &Actor, filter: &ActivityFilter) -> Result<Vec<Activity>, ServiceError> {
        let tenant = actor.require_tenant()?;
        let mut activities = self.activities.list_by_tenant(tenant)?;

        if actor.role == Role::Parent {
            activities.retain(|activity| {
                matches!(activity.visibility, Visibility::Internal | Visibility::Mixed)
            });
        } else if !matches!(actor.role, Role::TenantAdmin | Role::Teacher) {
            return Err(ServiceError::Forbidden(
                "catalog is not visible to this role".to_string(),
            ));
        }

        if let Some(cohort) = &filter.cohort {
            activities.retain(|activity| activity.cohorts.iter().any(|c| c == cohort));
        }
        if let Some(status) = filter.status {
            activities.retain(|activity| activity.status == status);
        }

        Ok(activities)
    }

    pub fn get(&self, actor: &Actor, id: &ActivityId) -> Result<Activity, ServiceError> {
        let activity = self
            .activities
            .find(id)?
            .ok_or(ServiceError::NotFound("activity"))?;

        match actor.role {
            Role::GlobalAdmin => {}
            Role::TenantAdmin | Role::Teacher | Role::Parent => {
                if actor.tenant_id.as_ref() != Some(&activity.tenant_id) {
                    return Err(ServiceError::Forbidden(
                        "activity belongs to another school".to_string(),
                    ));
                }
            }
            _ => {
                return Err(ServiceError::Forbidden(
                    "catalog is not visible to this role".to_string(),
                ))
            }
        }

        Ok(activity)
    }

    /// Patch an activity. Capacity shrinks are applied as-is; existing
    /// enrollments above the new limit are left untouched.
    pub fn update(
        &self,
        actor: &Actor,
        id: &ActivityId,
        patch: UpdateActivityRequest,
    ) -> Result<Activity, ServiceError> {
        if !matches!(actor.role, Role::TenantAdmin | Role::Teacher) {
            return Err(ServiceError::Forbidden(
                "only school admins and teachers can edit activities".to_string(),
            ));
        }

        let mut activity = self
            .activities
            .find(id)?
            .filter(|activity| actor.tenant_id.as_ref() == Some(&activity.tenant_id))
            .ok_or(ServiceError::NotFound("activity"))?;

        if let Some(name) = patch.name {
            activity.name = name;
        }
        if let Some(description) = patch.description {
            activity.description = Some(description);
        }
        if let Some(starts_at) = patch.starts_at {
            activity.starts_at = starts_at;
        }
        if let Some(ends_at) = patch.ends_at {
            activity.ends_at = ends_at;
        }
        if let Some(cohorts) = patch.cohorts {
            activity.cohorts = cohorts;
        }
        if let Some(capacity) = patch.capacity {
            activity.capacity = Some(capacity);
        }
        if let Some(price) = patch.price {
            activity.price = price;
        }
        if let Some(materials) = patch.materials {
            activity.materials = materials;
        }
        if let Some(visibility) = patch.visibility {
            activity.visibility = visibility;
        }
        if let Some(status) = patch.status {
            activity.status = status;
        }
        if let Some(coordinator) = patch.coordinator {
            activity.coordinator = Some(coordinator);
        }
        if let Some(payment_methods) = patch.payment_methods {
            activity.payment_methods = payment_methods;
        }
        activity.updated_at = Utc::now();

        self.activities.update(activity.clone())?;
        Ok(activity)
    }

    pub fn delete(&self, actor: &Actor, id: &ActivityId) -> Result<(), ServiceError> {
        if actor.role != Role::TenantAdmin {
            return Err(ServiceError::Forbidden(
                "only school admins can delete activities".to_string(),
            ));
        }

        let activity = self
            .activities
            .find(id)?
            .filter(|activity| actor.tenant_id.as_ref() == Some(&activity.tenant_id))
            .ok_or(ServiceError::NotFound("activity"))?;

        self.activities.delete(&activity.id)?;
        info!(activity = %activity.name, "activity deleted");
        Ok(())
    }
}
