//! Firestore-backed notification history repository.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use serde_json::Map;

use crate::error::AppResult;
use crate::firestore::{FirestoreClient, value};
use crate::models::{NewNotificationRecord, NotificationRecord, NotificationStatus};
use crate::repositories::NotificationRepository;

/// Collection holding notification history; owned by this service.
const NOTIFICATIONS_COLLECTION: &str = "notifications";

/// Wire name of the creation timestamp field.
const CREATED_AT_FIELD: &str = "createdAt";

/// Appends and prunes documents in the `notifications` collection.
#[derive(Clone)]
pub struct FirestoreNotificationRepository {
    client: Arc<FirestoreClient>,
}

impl FirestoreNotificationRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationRepository for FirestoreNotificationRepository {
    async fn append(&self, new_record: NewNotificationRecord) -> AppResult<()> {
        // Every stored record carries status "sent"; the status documents
        // the attempt, not per-device delivery.
        let record = NotificationRecord {
            title: new_record.title,
            body: new_record.body,
            created_at: new_record.created_at,
            status: NotificationStatus::Sent,
        };

        let mut fields = Map::new();
        fields.insert("title".to_string(), value::string_value(&record.title));
        fields.insert("body".to_string(), value::string_value(&record.body));
        fields.insert(
            CREATED_AT_FIELD.to_string(),
            value::timestamp_value(record.created_at),
        );
        fields.insert(
            "status".to_string(),
            value::string_value(record.status.as_str()),
        );

        self.client
            .create_document(NOTIFICATIONS_COLLECTION, fields)
            .await
    }

    async fn find_created_before(&self, cutoff: Timestamp) -> AppResult<Vec<String>> {
        self.client
            .query_created_before(NOTIFICATIONS_COLLECTION, CREATED_AT_FIELD, cutoff)
            .await
    }

    async fn delete(&self, ids: &[String]) -> AppResult<()> {
        self.client.delete_documents(ids).await
    }
}
