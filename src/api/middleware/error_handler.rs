//! Error handler for converting AppError to HTTP responses.
//!
//! Implements IntoResponse for AppError. The client-facing body carries a
//! static message per the error taxonomy; the underlying cause is logged
//! server-side and never exposed.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - Validation / BadRequest → 400 BAD_REQUEST
    /// - NoRecipients → 404 NOT_FOUND
    /// - WebhookDelivery / Notification / Cleanup → 500 with the
    ///   operation's static message
    /// - Store / Configuration / Internal → 500 generic
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_response) = match &self {
            AppError::Validation { reason, .. } => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(reason))
            }
            AppError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(message))
            }
            AppError::NoRecipients => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("No driver tokens found"),
            ),
            AppError::WebhookDelivery { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to send report to Slack"),
            ),
            AppError::Notification { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to send notifications"),
            ),
            AppError::Cleanup { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Cleanup failed"),
            ),
            AppError::Store { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Logs the full error chain server-side.
fn log_error(error: &AppError) {
    match error {
        AppError::Validation { .. } | AppError::BadRequest { .. } | AppError::NoRecipients => {
            tracing::debug!(error = %error, "Request rejected");
        }
        _ => {
            tracing::error!(error = %error, cause = ?source_chain(error), "Request failed");
        }
    }
}

/// Collects the source chain as display strings for structured logging.
fn source_chain(error: &AppError) -> Vec<String> {
    let mut chain = Vec::new();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}

/// Maps an AppError variant to its corresponding HTTP status code.
///
/// This function is useful for testing and validation purposes.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::NoRecipients => StatusCode::NOT_FOUND,
        AppError::WebhookDelivery { .. }
        | AppError::Notification { .. }
        | AppError::Cleanup { .. }
        | AppError::Store { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let error = AppError::Validation {
            field: "title".to_string(),
            reason: "Title and body required".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::BAD_REQUEST);
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_no_recipients_maps_to_404() {
        let error = AppError::NoRecipients;
        assert_eq!(error_to_status_code(&error), StatusCode::NOT_FOUND);
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_webhook_delivery_maps_to_500() {
        let error = AppError::WebhookDelivery {
            source: anyhow::anyhow!("webhook returned 503"),
        };
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_notification_maps_to_500() {
        let error = AppError::Notification {
            source: anyhow::anyhow!("fcm unreachable"),
        };
        assert_eq!(
            error_to_status_code(&error),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_cleanup_maps_to_500() {
        let error = AppError::Cleanup {
            source: anyhow::anyhow!("commit failed"),
        };
        assert_eq!(
            error_to_status_code(&error),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_hides_cause() {
        // The response body must stay generic no matter what the source says.
        let error = AppError::Store {
            operation: "list drivers".to_string(),
            source: anyhow::anyhow!("token contains sensitive data"),
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_source_chain_collects_causes() {
        let error = AppError::Notification {
            source: anyhow::anyhow!("inner").context("outer"),
        };
        let chain = source_chain(&error);
        assert_eq!(chain, vec!["outer".to_string(), "inner".to_string()]);
    }
}
