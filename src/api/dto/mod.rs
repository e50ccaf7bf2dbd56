//! Data transfer objects for the HTTP API.

mod error;
mod notification;
mod report;

pub use error::ErrorResponse;
pub use notification::{CleanupResponse, NotifyRequest, NotifyResponse};
pub use report::{ReportRequest, ReportResponse};
