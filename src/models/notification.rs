//! Notification history domain models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Delivery status recorded with a notification.
///
/// Only `Sent` exists today: the record documents that a broadcast was
/// attempted, not that every device received it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Sent => "sent",
        }
    }
}

/// A notification history entry in the `notifications` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub status: NotificationStatus,
}

/// Data for appending a new notification record.
///
/// There is no update path; records are written once and later swept.
#[derive(Debug, Clone)]
pub struct NewNotificationRecord {
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
}
