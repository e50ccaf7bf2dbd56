//! Repository layer for document-store access.
//!
//! Repositories are trait objects so handlers and services receive
//! explicitly constructed dependencies, and tests can substitute in-memory
//! implementations for the store.

mod driver_repo;
mod notification_repo;

pub use driver_repo::FirestoreDriverRepository;
pub use notification_repo::FirestoreNotificationRepository;

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;

use crate::error::AppResult;
use crate::firestore::FirestoreClient;
use crate::models::{DriverRecord, NewNotificationRecord};

/// Read-only access to the external-owned `drivers` collection.
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Reads the full driver collection.
    async fn list_drivers(&self) -> AppResult<Vec<DriverRecord>>;
}

/// Access to the `notifications` history collection.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Appends one history record. There is no update path.
    async fn append(&self, record: NewNotificationRecord) -> AppResult<()>;

    /// Returns the ids of records created strictly before `cutoff`.
    async fn find_created_before(&self, cutoff: Timestamp) -> AppResult<Vec<String>>;

    /// Deletes records by id.
    async fn delete(&self, ids: &[String]) -> AppResult<()>;
}

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap since every repository is behind an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub drivers: Arc<dyn DriverRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

impl Repositories {
    /// Creates Firestore-backed repositories over a shared client.
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self {
            drivers: Arc::new(FirestoreDriverRepository::new(client.clone())),
            notifications: Arc::new(FirestoreNotificationRepository::new(client)),
        }
    }
}
