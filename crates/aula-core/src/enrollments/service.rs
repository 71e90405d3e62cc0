use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{EnrollRequest, Enrollment, EnrollmentStatus};
use super::repository::EnrollmentRepository;
use crate::activities::repository::ActivityRepository;
use crate::domain::{Actor, EnrollmentId, Role};
use crate::error::{RepositoryError, ServiceError};
use crate::notifications::{NotificationCategory, NotificationDraft, NotificationSink};
use crate::students::repository::StudentRepository;

/// The enrollment ledger: validates and records the binding of a student
/// to an activity, and derives the initial status from the activity price.
pub struct EnrollmentService {
    students: Arc<dyn StudentRepository>,
    activities: Arc<dyn ActivityRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl EnrollmentService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        activities: Arc<dyn ActivityRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            students,
            activities,
            enrollments,
            notifications,
        }
    }

    /// Enroll a student into an activity on behalf of the acting parent.
    ///
    /// Preconditions, in order: parent role; the student exists and belongs
    /// to the actor; the activity exists; no enrollment exists yet for the
    /// (activity, student) pair; a free seat remains when the activity is
    /// capped. Free activities confirm immediately; priced ones start in
    /// `PaymentPending`. Exactly one notification goes to the parent.
    pub fn enroll(&self, actor: &Actor, request: EnrollRequest) -> Result<Enrollment, ServiceError> {
        if actor.role != Role::Parent {
            return Err(ServiceError::Forbidden(
                "only parents can enroll students".to_string(),
            ));
        }

        let student = self
            .students
            .find(&request.student_id)?
            .filter(|student| student.parent_id.as_ref() == Some(&actor.account_id))
            .ok_or(ServiceError::NotFound("student"))?;

        let activity = self
            .activities
            .find(&request.activity_id)?
            .ok_or(ServiceError::NotFound("activity"))?;

        if self
            .enrollments
            .find_pair(&request.activity_id, &request.student_id)?
            .is_some()
        {
            return Err(ServiceError::Conflict("student already enrolled"));
        }

        if let Some(capacity) = activity.capacity {
            let taken = self.enrollments.count_seats_taken(&activity.id)?;
            if taken >= capacity as usize {
                return Err(ServiceError::CapacityExceeded);
            }
        }

        let status = if activity.price > 0.0 {
            EnrollmentStatus::PaymentPending
        } else {
            EnrollmentStatus::Confirmed
        };

        let enrollment = Enrollment {
            id: EnrollmentId::generate(),
            activity_id: activity.id.clone(),
            student_id: student.id.clone(),
            parent_id: actor.account_id.clone(),
            // Denormalized from the student, not the activity; the two are
            // expected to match but are not cross-checked.
            tenant_id: student.tenant_id.clone(),
            status,
            paid_amount: 0.0,
            payment_method_used: None,
            paid_at: None,
            comments: request.comments,
            created_at: Utc::now(),
        };

        let stored = self.enrollments.insert(enrollment).map_err(|err| match err {
            RepositoryError::Conflict => ServiceError::Conflict("student already enrolled"),
            other => ServiceError::Repository(other),
        })?;

        let body = match status {
            EnrollmentStatus::Confirmed => format!(
                "{} is enrolled in {}.",
                student.full_name, activity.name
            ),
            _ => format!(
                "{} is enrolled in {}. Payment of {:.2} is pending.",
                student.full_name, activity.name, activity.price
            ),
        };
        self.notifications.emit(NotificationDraft {
            title: "Enrollment received".to_string(),
            body,
            category: NotificationCategory::Enrollment,
            recipient_id: actor.account_id.clone(),
            recipient_role: actor.role,
            tenant_id: stored.tenant_id.clone(),
            activity_id: Some(stored.activity_id.clone()),
            enrollment_id: Some(stored.id.clone()),
            payment_id: None,
        })?;

        info!(
            activity = %activity.name,
            student = %student.full_name,
            status = stored.status.label(),
            "enrollment recorded"
        );
        Ok(stored)
    }

    /// Parents see their own enrollments; school admins and teachers see
    /// every enrollment in their school.
    pub fn list(&self, actor: &Actor) -> Result<Vec<Enrollment>, ServiceError> {
        match actor.role {
            Role::Parent => Ok(self.enrollments.list_by_parent(&actor.account_id)?),
            Role::TenantAdmin | Role::Teacher => {
                let tenant = actor.require_tenant()?;
                Ok(self.enrollments.list_by_tenant(tenant)?)
            }
            _ => Err(ServiceError::Forbidden(
                "enrollments are not visible to this role".to_string(),
            )),
        }
    }
}
