//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers. Every dependency is constructed
//! explicitly at startup and passed in; nothing lives in module-level
//! singletons.

use crate::services::Services;

/// Application state containing all shared services.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since services hold their dependencies behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
}

impl AppState {
    /// Creates a new AppState from fully constructed services.
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}
