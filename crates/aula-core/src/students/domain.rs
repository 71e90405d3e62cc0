use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, StudentId, TenantId};

/// Roster entry, scoped to a school and optionally owned by a parent
/// account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub grade: String,
    pub tenant_id: TenantId,
    pub parent_id: Option<AccountId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub grade: String,
    /// Target school. Ignored for parent actors, whose own school is used.
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
    /// Owning parent. Ignored for parent actors, whose own id is used.
    #[serde(default)]
    pub parent_id: Option<AccountId>,
}
