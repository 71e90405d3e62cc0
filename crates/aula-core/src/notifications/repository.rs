use chrono::Utc;

use super::domain::{Notification, NotificationDraft};
use crate::domain::{AccountId, NotificationId};
use crate::error::RepositoryError;

pub trait NotificationRepository: Send + Sync {
    fn append(&self, notification: Notification) -> Result<(), RepositoryError>;
    fn find(&self, id: &NotificationId) -> Result<Option<Notification>, RepositoryError>;
    fn list_for(&self, recipient: &AccountId) -> Result<Vec<Notification>, RepositoryError>;
    fn update(&self, notification: Notification) -> Result<(), RepositoryError>;
}

/// The only write surface the enrollment and payment ledgers use. There is
/// no delivery guarantee beyond persistence: no retry, no external channel.
pub trait NotificationSink: Send + Sync {
    fn emit(&self, draft: NotificationDraft) -> Result<Notification, RepositoryError>;
}

impl<T: NotificationRepository> NotificationSink for T {
    fn emit(&self, draft: NotificationDraft) -> Result<Notification, RepositoryError> {
        let notification = Notification {
            id: NotificationId::generate(),
            title: draft.title,
            body: draft.body,
            category: draft.category,
            recipient_id: draft.recipient_id,
            recipient_role: draft.recipient_role,
            read: false,
            tenant_id: draft.tenant_id,
            activity_id: draft.activity_id,
            enrollment_id: draft.enrollment_id,
            payment_id: draft.payment_id,
            created_at: Utc::now(),
        };
        self.append(notification.clone())?;
        Ok(notification)
    }
}
