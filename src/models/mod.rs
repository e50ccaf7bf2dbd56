//! Domain models for drivers and notification history.

mod driver;
mod notification;

pub use driver::DriverRecord;
pub use notification::{NewNotificationRecord, NotificationRecord, NotificationStatus};
