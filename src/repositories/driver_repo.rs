//! Firestore-backed driver repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::firestore::{FirestoreClient, value};
use crate::models::DriverRecord;
use crate::repositories::DriverRepository;

/// Collection holding driver registrations; owned by an external process.
const DRIVERS_COLLECTION: &str = "drivers";

/// Wire name of the push-token field inside a driver document.
const TOKEN_FIELD: &str = "fcmToken";

/// Reads driver documents from the `drivers` collection.
#[derive(Clone)]
pub struct FirestoreDriverRepository {
    client: Arc<FirestoreClient>,
}

impl FirestoreDriverRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DriverRepository for FirestoreDriverRepository {
    async fn list_drivers(&self) -> AppResult<Vec<DriverRecord>> {
        let documents = self.client.list_documents(DRIVERS_COLLECTION).await?;

        Ok(documents
            .into_iter()
            .map(|doc| DriverRecord {
                fcm_token: value::get_string(&doc.fields, TOKEN_FIELD).map(String::from),
            })
            .collect())
    }
}
