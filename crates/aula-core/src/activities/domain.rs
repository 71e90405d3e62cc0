use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ActivityId, PaymentMethod, TenantId};

/// Catalog entry for an event or recurring activity offered by a school.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub tenant_id: TenantId,
    pub cohorts: Vec<String>,
    /// Upper bound on confirmed plus payment-pending enrollments. `None`
    /// means unlimited. Enforced only at enrollment time; editing it below
    /// the current enrollment count is not reconciled.
    pub capacity: Option<u32>,
    /// Per-student price; zero means free.
    pub price: f64,
    pub materials: Vec<String>,
    pub visibility: Visibility,
    pub status: ActivityStatus,
    pub coordinator: Option<String>,
    pub payment_methods: Vec<PaymentMethod>,
    pub permanent: bool,
    pub signup_link: Option<String>,
    pub manual_validation: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only students of the owning school.
    Internal,
    /// Open to the public.
    External,
    /// Students plus external participants.
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Pending,
    Confirmed,
    Cancelled,
    Rescheduled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivityRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub cohorts: Vec<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    #[serde(default)]
    pub coordinator: Option<String>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub permanent: bool,
    #[serde(default)]
    pub manual_validation: bool,
}

fn default_visibility() -> Visibility {
    Visibility::Internal
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateActivityRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cohorts: Option<Vec<String>>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub materials: Option<Vec<String>>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub status: Option<ActivityStatus>,
    #[serde(default)]
    pub coordinator: Option<String>,
    #[serde(default)]
    pub payment_methods: Option<Vec<PaymentMethod>>,
}

/// Catalog listing filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityFilter {
    #[serde(default)]
    pub cohort: Option<String>,
    #[serde(default)]
    pub status: Option<ActivityStatus>,
}
