use std::sync::Arc;

use serde::Serialize;

use crate::activities::domain::ActivityStatus;
use crate::activities::repository::ActivityRepository;
use crate::domain::{Actor, Role};
use crate::enrollments::domain::EnrollmentStatus;
use crate::enrollments::repository::EnrollmentRepository;
use crate::error::ServiceError;
use crate::students::repository::StudentRepository;

/// Role-dependent aggregate view over the ledgers.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DashboardStats {
    Admin(AdminStats),
    Parent(ParentStats),
    Unavailable { message: String },
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total_activities: usize,
    pub confirmed_activities: usize,
    pub total_enrollments: usize,
    pub total_students: usize,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ParentStats {
    pub children: usize,
    pub active_enrollments: usize,
    pub pending_payments: usize,
}

pub struct DashboardService {
    students: Arc<dyn StudentRepository>,
    activities: Arc<dyn ActivityRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl DashboardService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        activities: Arc<dyn ActivityRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            students,
            activities,
            enrollments,
        }
    }

    pub fn stats(&self, actor: &Actor) -> Result<DashboardStats, ServiceError> {
        match actor.role {
            Role::TenantAdmin => {
                let tenant = actor.require_tenant()?;
                let activities = self.activities.list_by_tenant(tenant)?;
                let confirmed_activities = activities
                    .iter()
                    .filter(|activity| activity.status == ActivityStatus::Confirmed)
                    .count();

                Ok(DashboardStats::Admin(AdminStats {
                    total_activities: activities.len(),
                    confirmed_activities,
                    total_enrollments: self.enrollments.list_by_tenant(tenant)?.len(),
                    total_students: self.students.list_by_tenant(tenant)?.len(),
                }))
            }
            Role::Parent => {
                let children = self.students.list_by_parent(&actor.account_id)?.len();
                let enrollments = self.enrollments.list_by_parent(&actor.account_id)?;
                let active_enrollments = enrollments
                    .iter()
                    .filter(|enrollment| enrollment.status.occupies_seat())
                    .count();
                let pending_payments = enrollments
                    .iter()
                    .filter(|enrollment| enrollment.status == EnrollmentStatus::PaymentPending)
                    .count();

                Ok(DashboardStats::Parent(ParentStats {
                    children,
                    active_enrollments,
                    pending_payments,
                }))
            }
            _ => Ok(DashboardStats::Unavailable {
                message: "dashboard not available for this role".to_string(),
            }),
        }
    }
}
