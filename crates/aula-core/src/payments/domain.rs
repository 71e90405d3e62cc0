use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    AccountId, ActivityId, EnrollmentId, PaymentId, PaymentMethod, StudentId, TenantId,
};

/// One attempted settlement of the cost bound to an enrollment. Activity,
/// student, parent, and tenant references are denormalized from the
/// enrollment at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub enrollment_id: EnrollmentId,
    pub activity_id: ActivityId,
    pub student_id: StudentId,
    pub parent_id: AccountId,
    pub tenant_id: TenantId,
    /// Always copied from the activity price at creation time; any
    /// client-supplied amount is ignored.
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub reference_code: String,
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_payload: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `Failed` and `Refunded` are declared for a future gateway integration;
/// no operation currently reaches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub enrollment_id: EnrollmentId,
    pub method: PaymentMethod,
    #[serde(default)]
    pub method_payload: Option<serde_json::Value>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Opaque unique token quoted in offline payment instructions.
pub fn generate_reference_code() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("PAY-{}", token[..12].to_ascii_uppercase())
}
