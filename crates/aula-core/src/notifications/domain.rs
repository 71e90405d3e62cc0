use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, ActivityId, EnrollmentId, NotificationId, PaymentId, Role, TenantId};

/// Append-only per-recipient message produced by ledger transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub category: NotificationCategory,
    pub recipient_id: AccountId,
    pub recipient_role: Role,
    pub read: bool,
    pub tenant_id: TenantId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<ActivityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_id: Option<EnrollmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<PaymentId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Enrollment,
    Payment,
    Activity,
    General,
}

/// Everything a ledger supplies when emitting; id, read flag, and
/// timestamp are filled in by the sink.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub title: String,
    pub body: String,
    pub category: NotificationCategory,
    pub recipient_id: AccountId,
    pub recipient_role: Role,
    pub tenant_id: TenantId,
    pub activity_id: Option<ActivityId>,
    pub enrollment_id: Option<EnrollmentId>,
    pub payment_id: Option<PaymentId>,
}
