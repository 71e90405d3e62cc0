use std::sync::Arc;

use super::domain::Notification;
use super::repository::NotificationRepository;
use crate::domain::{Actor, NotificationId};
use crate::error::ServiceError;

pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Inbox for the acting account, newest first.
    pub fn list(&self, actor: &Actor) -> Result<Vec<Notification>, ServiceError> {
        let mut notifications = self.notifications.list_for(&actor.account_id)?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    /// Flip the read flag. Scoped to the recipient: someone else's
    /// notification id is indistinguishable from a missing one.
    pub fn mark_read(
        &self,
        actor: &Actor,
        id: &NotificationId,
    ) -> Result<Notification, ServiceError> {
        let mut notification = self
            .notifications
            .find(id)?
            .filter(|notification| notification.recipient_id == actor.account_id)
            .ok_or(ServiceError::NotFound("notification"))?;

        notification.read = true;
        self.notifications.update(notification.clone())?;
        Ok(notification)
    }
}
