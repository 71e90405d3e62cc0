use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{CreateStudentRequest, StudentRecord};
use super::repository::StudentRepository;
use crate::domain::{Actor, Role, StudentId};
use crate::error::ServiceError;

pub struct StudentService {
    students: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }

    /// Create a roster entry. Parent actors cannot register students under
    /// another parent or school: their own id and school always win over
    /// whatever the client supplied.
    pub fn create(
        &self,
        actor: &Actor,
        mut request: CreateStudentRequest,
    ) -> Result<StudentRecord, ServiceError> {
        match actor.role {
            Role::TenantAdmin => {}
            Role::Parent => {
                request.parent_id = Some(actor.account_id.clone());
                request.tenant_id = actor.tenant_id.clone();
            }
            _ => {
                return Err(ServiceError::Forbidden(
                    "only school admins and parents can register students".to_string(),
                ))
            }
        }

        let tenant_id = request
            .tenant_id
            .ok_or_else(|| ServiceError::Forbidden("no school assigned".to_string()))?;

        let student = StudentRecord {
            id: StudentId::generate(),
            full_name: request.full_name,
            birth_date: request.birth_date,
            grade: request.grade,
            tenant_id,
            parent_id: request.parent_id,
            created_at: Utc::now(),
        };

        let stored = self.students.insert(student)?;
        info!(student = %stored.full_name, grade = %stored.grade, "student registered");
        Ok(stored)
    }

    pub fn list(&self, actor: &Actor) -> Result<Vec<StudentRecord>, ServiceError> {
        match actor.role {
            Role::Parent => Ok(self.students.list_by_parent(&actor.account_id)?),
            Role::TenantAdmin => {
                let tenant = actor.require_tenant()?;
                Ok(self.students.list_by_tenant(tenant)?)
            }
            _ => Err(ServiceError::Forbidden(
                "roster is not visible to this role".to_string(),
            )),
        }
    }
}
