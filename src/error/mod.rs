//! Error handling module.
//!
//! Defines the application error taxonomy and the `AppResult` alias used
//! throughout the service and API layers.

mod app_error;

pub use app_error::{AppError, AppResult};
