//! Error response DTO.

use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response body.
///
/// Callers only ever receive a static message; diagnostic detail stays in
/// the server logs.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new error response with the given message.
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}
