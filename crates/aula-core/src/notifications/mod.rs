//! Notification sink: append-only per-recipient messages emitted by the
//! enrollment and payment ledgers.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Notification, NotificationCategory, NotificationDraft};
pub use repository::{NotificationRepository, NotificationSink};
pub use router::{notification_router, NotificationsApi};
pub use service::NotificationService;
