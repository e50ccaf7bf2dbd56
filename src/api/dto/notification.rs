//! Notification-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::push::MulticastSummary;

/// Request to broadcast a push notification to all drivers.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "title": "Route update",
    "body": "Depot closes early today"
}))]
pub struct NotifyRequest {
    #[validate(length(min = 1, message = "Title and body required"))]
    /// Notification title (required, non-empty)
    pub title: String,

    #[validate(length(min = 1, message = "Title and body required"))]
    /// Notification body (required, non-empty)
    pub body: String,
}

/// Response for a completed broadcast attempt.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotifyResponse {
    /// True when the broadcast attempt completed
    pub success: bool,
    /// Per-token delivery tally reported by the push provider
    pub response: MulticastSummary,
}

/// Response for a completed retention sweep.
#[derive(Debug, Serialize, ToSchema)]
pub struct CleanupResponse {
    pub message: String,
}
