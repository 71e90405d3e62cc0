use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{generate_reference_code, CreatePaymentRequest, Payment, PaymentStatus};
use super::repository::PaymentRepository;
use crate::activities::repository::ActivityRepository;
use crate::domain::{Actor, PaymentId, PaymentMethod, Role};
use crate::enrollments::domain::EnrollmentStatus;
use crate::enrollments::repository::EnrollmentRepository;
use crate::error::{RepositoryError, ServiceError};
use crate::notifications::{NotificationCategory, NotificationDraft, NotificationSink};

/// The payment ledger: records one payment attempt per enrollment and
/// drives the enrollment's status transition on completion.
///
/// ```text
/// created --(method=card)--> completed
/// created --(method=cash|transfer)--> pending --(admin confirm)--> completed
/// ```
pub struct PaymentService {
    enrollments: Arc<dyn EnrollmentRepository>,
    activities: Arc<dyn ActivityRepository>,
    payments: Arc<dyn PaymentRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl PaymentService {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        activities: Arc<dyn ActivityRepository>,
        payments: Arc<dyn PaymentRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            enrollments,
            activities,
            payments,
            notifications,
        }
    }

    /// Record a payment attempt for an enrollment owned by the acting
    /// parent. The amount is always the activity price at this moment;
    /// card payments settle synchronously and promote the enrollment,
    /// cash and transfer wait for administrative confirmation.
    pub fn create_payment(
        &self,
        actor: &Actor,
        request: CreatePaymentRequest,
    ) -> Result<Payment, ServiceError> {
        if actor.role != Role::Parent {
            return Err(ServiceError::Forbidden(
                "only parents can record payments".to_string(),
            ));
        }

        let mut enrollment = self
            .enrollments
            .find(&request.enrollment_id)?
            .filter(|enrollment| enrollment.parent_id == actor.account_id)
            .ok_or(ServiceError::NotFound("enrollment"))?;

        let activity = self
            .activities
            .find(&enrollment.activity_id)?
            .ok_or(ServiceError::NotFound("activity"))?;

        if self
            .payments
            .find_by_enrollment(&enrollment.id)?
            .is_some()
        {
            return Err(ServiceError::Conflict("payment already exists"));
        }

        let now = Utc::now();
        let settled_now = request.method == PaymentMethod::Card;
        let payment = Payment {
            id: PaymentId::generate(),
            enrollment_id: enrollment.id.clone(),
            activity_id: enrollment.activity_id.clone(),
            student_id: enrollment.student_id.clone(),
            parent_id: enrollment.parent_id.clone(),
            tenant_id: enrollment.tenant_id.clone(),
            amount: activity.price,
            method: request.method,
            status: if settled_now {
                PaymentStatus::Completed
            } else {
                PaymentStatus::Pending
            },
            reference_code: generate_reference_code(),
            processed_at: settled_now.then_some(now),
            method_payload: request.method_payload,
            notes: request.notes,
            created_at: now,
        };

        let stored = self.payments.insert(payment).map_err(|err| match err {
            RepositoryError::Conflict => ServiceError::Conflict("payment already exists"),
            other => ServiceError::Repository(other),
        })?;

        if settled_now {
            enrollment.status = EnrollmentStatus::Confirmed;
            enrollment.paid_amount = stored.amount;
            enrollment.payment_method_used = Some(stored.method);
            enrollment.paid_at = Some(now);
            self.enrollments.update(enrollment)?;
        }

        let (title, body) = match stored.method {
            PaymentMethod::Card => (
                "Payment received",
                format!(
                    "Your card payment of {:.2} for {} is confirmed.",
                    stored.amount, activity.name
                ),
            ),
            PaymentMethod::Transfer => (
                "Payment pending",
                format!(
                    "Transfer {:.2} to the school account quoting reference {}. \
                     The enrollment is confirmed once the school verifies it.",
                    stored.amount, stored.reference_code
                ),
            ),
            PaymentMethod::Cash => (
                "Payment pending",
                format!(
                    "Pay {:.2} in cash at the school office quoting reference {}. \
                     The enrollment is confirmed once the school verifies it.",
                    stored.amount, stored.reference_code
                ),
            ),
        };
        self.notifications.emit(NotificationDraft {
            title: title.to_string(),
            body,
            category: NotificationCategory::Payment,
            recipient_id: stored.parent_id.clone(),
            recipient_role: Role::Parent,
            tenant_id: stored.tenant_id.clone(),
            activity_id: Some(stored.activity_id.clone()),
            enrollment_id: Some(stored.enrollment_id.clone()),
            payment_id: Some(stored.id.clone()),
        })?;

        info!(
            method = stored.method.label(),
            status = stored.status.label(),
            amount = stored.amount,
            "payment recorded"
        );
        Ok(stored)
    }

    /// Administrative settlement of an offline (cash/transfer) payment.
    /// Re-confirming an already-completed payment re-sets the same fields
    /// and emits another notification; the operation is not idempotent.
    pub fn confirm_payment(&self, actor: &Actor, id: &PaymentId) -> Result<Payment, ServiceError> {
        if actor.role != Role::TenantAdmin {
            return Err(ServiceError::Forbidden(
                "only school admins can confirm payments".to_string(),
            ));
        }

        let mut payment = self
            .payments
            .find(id)?
            .ok_or(ServiceError::NotFound("payment"))?;

        let mut enrollment = self
            .enrollments
            .find(&payment.enrollment_id)?
            .ok_or(ServiceError::NotFound("enrollment"))?;

        if actor.tenant_id.as_ref() != Some(&enrollment.tenant_id) {
            return Err(ServiceError::Forbidden(
                "payment belongs to another school".to_string(),
            ));
        }

        let now = Utc::now();
        payment.status = PaymentStatus::Completed;
        payment.processed_at = Some(now);
        self.payments.update(payment.clone())?;

        enrollment.status = EnrollmentStatus::Confirmed;
        enrollment.paid_amount = payment.amount;
        enrollment.payment_method_used = Some(payment.method);
        enrollment.paid_at = Some(now);
        self.enrollments.update(enrollment)?;

        self.notifications.emit(NotificationDraft {
            title: "Payment confirmed".to_string(),
            body: format!(
                "Your {} payment of {:.2} (reference {}) has been confirmed.",
                payment.method.label(),
                payment.amount,
                payment.reference_code
            ),
            category: NotificationCategory::Payment,
            recipient_id: payment.parent_id.clone(),
            recipient_role: Role::Parent,
            tenant_id: payment.tenant_id.clone(),
            activity_id: Some(payment.activity_id.clone()),
            enrollment_id: Some(payment.enrollment_id.clone()),
            payment_id: Some(payment.id.clone()),
        })?;

        info!(reference = %payment.reference_code, "payment confirmed");
        Ok(payment)
    }

    /// Parents see their own payments; school admins see payments whose
    /// enrollment belongs to their school, resolved through the tenant's
    /// enrollment id set.
    pub fn list(&self, actor: &Actor) -> Result<Vec<Payment>, ServiceError> {
        match actor.role {
            Role::Parent => Ok(self.payments.list_by_parent(&actor.account_id)?),
            Role::TenantAdmin => {
                let tenant = actor.require_tenant()?;
                let enrollment_ids: Vec<_> = self
                    .enrollments
                    .list_by_tenant(tenant)?
                    .into_iter()
                    .map(|enrollment| enrollment.id)
                    .collect();
                Ok(self.payments.list_by_enrollments(&enrollment_ids)?)
            }
            _ => Err(ServiceError::Forbidden(
                "payments are not visible to this role".to_string(),
            )),
        }
    }
}
