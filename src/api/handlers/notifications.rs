//! Notification API handlers.
//!
//! Provides HTTP handlers for the fleet push broadcast and the history
//! retention sweep.

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{CleanupResponse, ErrorResponse, NotifyRequest, NotifyResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates notification-related routes.
///
/// Routes:
/// - POST /notify                  - Broadcast to all driver devices
/// - DELETE /cleanup-notifications - Sweep records older than 7 days
pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(broadcast_notification))
        .routes(routes!(cleanup_notifications))
}

/// POST /api/notify - Broadcast a push notification to all drivers
///
/// Reads every registered device token, issues one multicast send, and
/// appends a history record for the attempt. Per-token delivery failures
/// are tallied in the response, not treated as errors.
#[utoipa::path(
    post,
    path = "/notify",
    tag = NOTIFICATION_TAG,
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Broadcast attempted", body = NotifyResponse),
        (status = 400, description = "Missing or empty title/body", body = ErrorResponse),
        (status = 404, description = "No driver tokens registered", body = ErrorResponse),
        (status = 500, description = "Broadcast failed", body = ErrorResponse)
    )
)]
async fn broadcast_notification(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NotifyRequest>,
) -> AppResult<Json<NotifyResponse>> {
    let summary = state
        .services
        .notifications
        .broadcast(&payload.title, &payload.body)
        .await?;

    Ok(Json(NotifyResponse {
        success: true,
        response: summary,
    }))
}

/// DELETE /api/cleanup-notifications - Sweep old notification records
///
/// Deletes notification history older than seven days. The response does
/// not report the count; it is logged server-side.
#[utoipa::path(
    delete,
    path = "/cleanup-notifications",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Sweep completed", body = CleanupResponse),
        (status = 500, description = "Sweep failed", body = ErrorResponse)
    )
)]
async fn cleanup_notifications(State(state): State<AppState>) -> AppResult<Json<CleanupResponse>> {
    state
        .services
        .notifications
        .cleanup_old_notifications()
        .await?;

    Ok(Json(CleanupResponse {
        message: "Old notifications cleaned up".to_string(),
    }))
}
