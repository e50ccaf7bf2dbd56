//! Report-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to submit a driver-issue report.
///
/// Both strings are free-form and forwarded verbatim; no length limits or
/// sanitization are applied.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "name": "Asha",
    "issue": "Flat tire on route 9"
}))]
pub struct ReportRequest {
    /// Reporting driver's name
    pub name: String,

    /// Issue description
    pub issue: String,
}

/// Response for a delivered report.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponse {
    pub message: String,
}
