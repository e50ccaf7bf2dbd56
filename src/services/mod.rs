//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the push provider, and handlers.

mod notification_service;
mod report_service;

pub use notification_service::{NotificationService, retention_cutoff};
pub use report_service::{ReportService, format_report_message};

use std::sync::Arc;

use crate::config::WebhookConfig;
use crate::push::PushProvider;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since the underlying dependencies use `Arc`.
#[derive(Clone)]
pub struct Services {
    pub reports: ReportService,
    pub notifications: NotificationService,
}

impl Services {
    /// Creates a new Services instance from explicitly constructed
    /// dependencies.
    pub fn new(repos: Repositories, push: Arc<dyn PushProvider>, webhook: WebhookConfig) -> Self {
        Self {
            reports: ReportService::new(webhook),
            notifications: NotificationService::new(repos.drivers, repos.notifications, push),
        }
    }
}
