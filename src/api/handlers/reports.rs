//! Report API handlers.
//!
//! Provides the HTTP handler for driver-issue report submission.

use crate::api::doc::REPORT_TAG;
use crate::api::dto::{ErrorResponse, ReportRequest, ReportResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates report-related routes.
///
/// Routes:
/// - POST /report - Forward a driver-issue report to the chat webhook
pub fn report_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(submit_report))
}

/// POST /api/report - Submit a driver-issue report
///
/// Forwards the report to the configured chat webhook as a formatted text
/// message stamped with the current server time. The report is not
/// persisted; a delivery failure loses it.
#[utoipa::path(
    post,
    path = "/report",
    tag = REPORT_TAG,
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Report delivered", body = ReportResponse),
        (status = 500, description = "Webhook delivery failed", body = ErrorResponse)
    )
)]
async fn submit_report(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ReportRequest>,
) -> AppResult<Json<ReportResponse>> {
    state
        .services
        .reports
        .submit_report(&payload.name, &payload.issue)
        .await?;

    Ok(Json(ReportResponse {
        message: "Report sent to Slack successfully.".to_string(),
    }))
}
