use thiserror::Error;

/// Application-wide error type covering every failure the relay can surface.
///
/// Delivery failures deliberately collapse to coarse variants: the caller
/// only ever sees a static message and a status code, while the underlying
/// cause is carried as a source for server-side logging.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// No driver has a usable device token registered
    #[error("No driver tokens found")]
    NoRecipients,

    /// The outbound report webhook call failed (network error or non-OK status)
    #[error("Webhook delivery failed")]
    WebhookDelivery {
        #[source]
        source: anyhow::Error,
    },

    /// The push broadcast failed (token read, multicast transport, or record write)
    #[error("Notification broadcast failed")]
    Notification {
        #[source]
        source: anyhow::Error,
    },

    /// The retention sweep failed
    #[error("Notification cleanup failed")]
    Cleanup {
        #[source]
        source: anyhow::Error,
    },

    /// Document store operation error with operation context
    #[error("Store operation failed: {operation}")]
    Store {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
