use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, ActivityId, EnrollmentId, PaymentMethod, StudentId, TenantId};

/// Binding of one student to one activity. The tenant reference is
/// denormalized from the student record at creation time so tenant-scoped
/// listings never need a join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub activity_id: ActivityId,
    pub student_id: StudentId,
    pub parent_id: AccountId,
    pub tenant_id: TenantId,
    pub status: EnrollmentStatus,
    pub paid_amount: f64,
    pub payment_method_used: Option<PaymentMethod>,
    pub paid_at: Option<DateTime<Utc>>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Pending,
    Confirmed,
    PaymentPending,
    Cancelled,
}

impl EnrollmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Confirmed => "confirmed",
            EnrollmentStatus::PaymentPending => "payment_pending",
            EnrollmentStatus::Cancelled => "cancelled",
        }
    }

    /// Statuses that consume a capacity slot.
    pub const fn occupies_seat(self) -> bool {
        matches!(
            self,
            EnrollmentStatus::Confirmed | EnrollmentStatus::PaymentPending
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub activity_id: ActivityId,
    pub student_id: StudentId,
    #[serde(default)]
    pub comments: Option<String>,
}
