//! Firestore REST document client.
//!
//! A thin wrapper over the Firestore v1 REST API covering exactly the
//! operations this service performs: listing a collection, appending a
//! document, querying by timestamp, and committing batched deletes.

use std::sync::Arc;

use anyhow::anyhow;
use jiff::Timestamp;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::error::{AppError, AppResult};
use crate::external::HTTP_CLIENT;
use crate::firestore::auth::TokenProvider;

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Page size used when listing a collection.
const LIST_PAGE_SIZE: usize = 300;

/// Maximum writes Firestore accepts in one commit.
pub const MAX_BATCH_WRITES: usize = 500;

/// A document as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Fully qualified resource name
    /// (`projects/{p}/databases/(default)/documents/{collection}/{id}`)
    pub name: String,
    /// Typed field map; absent for empty documents
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RunQueryEntry {
    document: Option<Document>,
}

/// Firestore document client bound to one project's default database.
pub struct FirestoreClient {
    project_id: String,
    auth: Arc<TokenProvider>,
}

impl FirestoreClient {
    /// Creates a client for the given project.
    pub fn new(project_id: String, auth: Arc<TokenProvider>) -> Self {
        Self { project_id, auth }
    }

    /// Resource path of the database's document root.
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    /// Reads every document in a collection, following pagination.
    pub async fn list_documents(&self, collection: &str) -> AppResult<Vec<Document>> {
        let token = self.auth.token().await?;
        let url = format!("{FIRESTORE_BASE_URL}/{}/{collection}", self.documents_root());

        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = HTTP_CLIENT
                .get(&url)
                .bearer_auth(&token)
                .query(&[("pageSize", LIST_PAGE_SIZE.to_string())]);
            if let Some(ref next) = page_token {
                request = request.query(&[("pageToken", next)]);
            }

            let page: ListDocumentsResponse = self
                .execute(request, &format!("list {collection}"))
                .await?;
            documents.extend(page.documents);

            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(documents)
    }

    /// Appends a document with server-assigned id to a collection.
    pub async fn create_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> AppResult<()> {
        let token = self.auth.token().await?;
        let url = format!("{FIRESTORE_BASE_URL}/{}/{collection}", self.documents_root());

        let request = HTTP_CLIENT
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({ "fields": fields }));

        self.execute::<Value>(request, &format!("create in {collection}"))
            .await?;
        Ok(())
    }

    /// Returns the resource names of documents in `collection` whose
    /// timestamp field is strictly before `cutoff`.
    pub async fn query_created_before(
        &self,
        collection: &str,
        field: &str,
        cutoff: Timestamp,
    ) -> AppResult<Vec<String>> {
        let token = self.auth.token().await?;
        let url = format!("{FIRESTORE_BASE_URL}/{}:runQuery", self.documents_root());

        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "LESS_THAN",
                        "value": { "timestampValue": cutoff.to_string() }
                    }
                }
            }
        });

        let request = HTTP_CLIENT.post(&url).bearer_auth(&token).json(&query);
        let entries: Vec<RunQueryEntry> = self
            .execute(request, &format!("query {collection}"))
            .await?;

        // Entries without a document carry only read metadata.
        Ok(entries
            .into_iter()
            .filter_map(|e| e.document)
            .map(|d| d.name)
            .collect())
    }

    /// Deletes documents by resource name, committing in chunks of at most
    /// [`MAX_BATCH_WRITES`]. Each chunk commits atomically; the delete as a
    /// whole does not.
    pub async fn delete_documents(&self, names: &[String]) -> AppResult<()> {
        if names.is_empty() {
            return Ok(());
        }

        let token = self.auth.token().await?;
        let url = format!("{FIRESTORE_BASE_URL}/{}:commit", self.documents_root());

        for chunk in names.chunks(MAX_BATCH_WRITES) {
            let writes: Vec<Value> = chunk.iter().map(|name| json!({ "delete": name })).collect();

            let request = HTTP_CLIENT
                .post(&url)
                .bearer_auth(&token)
                .json(&json!({ "writes": writes }));

            self.execute::<Value>(request, "batch delete").await?;
        }

        Ok(())
    }

    /// Sends a request and deserializes the response, mapping transport
    /// errors and non-success statuses to a store error for `operation`.
    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> AppResult<T> {
        let response = request.send().await.map_err(|e| AppError::Store {
            operation: operation.to_string(),
            source: anyhow!(e).context("firestore unreachable"),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Store {
                operation: operation.to_string(),
                source: anyhow!("firestore returned {status}: {body}"),
            });
        }

        response.json().await.map_err(|e| AppError::Store {
            operation: operation.to_string(),
            source: anyhow!(e).context("malformed firestore response"),
        })
    }
}
