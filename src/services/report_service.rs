//! Driver-report submission service.
//!
//! Formats an issue report as a chat message and delivers it with a single
//! POST to the configured webhook. Reports are not persisted; a failed
//! delivery loses the report.

use anyhow::anyhow;
use jiff::Zoned;
use serde_json::json;

use crate::config::WebhookConfig;
use crate::error::{AppError, AppResult};
use crate::external::HTTP_CLIENT;

/// Sends driver-issue reports to the chat webhook.
#[derive(Clone)]
pub struct ReportService {
    webhook: WebhookConfig,
}

impl ReportService {
    pub fn new(webhook: WebhookConfig) -> Self {
        Self { webhook }
    }

    /// Submits a report, stamped with the current server-local time.
    ///
    /// The strings go into the message verbatim; the webhook is trusted
    /// content-wise. Every failure mode (unreachable endpoint, non-OK
    /// status) collapses to `WebhookDelivery`.
    pub async fn submit_report(&self, name: &str, issue: &str) -> AppResult<()> {
        let message = format_report_message(name, issue, &Zoned::now());

        let response = HTTP_CLIENT
            .post(&self.webhook.url)
            .json(&json!({ "text": message }))
            .send()
            .await
            .map_err(|e| AppError::WebhookDelivery {
                source: anyhow!(e).context("webhook unreachable"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::WebhookDelivery {
                source: anyhow!("webhook returned {status}"),
            });
        }

        tracing::info!(name = %name, "Driver report delivered to webhook");
        Ok(())
    }
}

/// Builds the multi-line chat message for a driver report.
pub fn format_report_message(name: &str, issue: &str, time: &Zoned) -> String {
    format!(
        "🚨 New Driver Report\n*Name:* {name}\n*Issue:* {issue}\n*Time:* {}",
        time.strftime("%Y-%m-%d %H:%M:%S %Z")
    )
}
