//! FCM push provider implementation.
//!
//! Sends one HTTP v1 message per token and tallies the outcomes. A token
//! the provider rejects counts as a failure; it never fails the multicast
//! as a whole.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::external::HTTP_CLIENT;
use crate::firestore::TokenProvider;
use crate::push::{MulticastSummary, PushProvider};

const FCM_BASE_URL: &str = "https://fcm.googleapis.com/v1";

/// FCM push provider bound to one project.
pub struct FcmProvider {
    project_id: String,
    auth: Arc<TokenProvider>,
}

impl FcmProvider {
    /// Creates a provider sharing the service-account token provider.
    pub fn new(project_id: String, auth: Arc<TokenProvider>) -> Self {
        Self { project_id, auth }
    }

    fn send_url(&self) -> String {
        format!("{FCM_BASE_URL}/projects/{}/messages:send", self.project_id)
    }
}

#[async_trait]
impl PushProvider for FcmProvider {
    /// Delivers the payload token by token, sequentially.
    ///
    /// Only a failure to obtain an access token aborts the call; per-token
    /// transport errors and provider rejections are tallied as failures.
    async fn send_multicast(
        &self,
        tokens: &[String],
        title: &str,
        body: &str,
    ) -> AppResult<MulticastSummary> {
        let access_token = self.auth.token().await.map_err(|e| AppError::Notification {
            source: anyhow::Error::new(e).context("push provider authentication failed"),
        })?;

        let url = self.send_url();
        let mut summary = MulticastSummary::default();

        for token in tokens {
            let message = json!({
                "message": {
                    "token": token,
                    "data": { "title": title, "body": body }
                }
            });

            let result = HTTP_CLIENT
                .post(&url)
                .bearer_auth(&access_token)
                .json(&message)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    summary.success_count += 1;
                }
                Ok(response) => {
                    summary.failure_count += 1;
                    let status = response.status();
                    let detail = response.text().await.unwrap_or_default();
                    tracing::warn!(
                        status = %status,
                        detail = %detail,
                        "FCM rejected a device token"
                    );
                }
                Err(e) => {
                    summary.failure_count += 1;
                    tracing::warn!(error = %e, "FCM send failed for a device token");
                }
            }
        }

        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "fcm"
    }
}
