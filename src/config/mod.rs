//! Configuration module for driver-relay
//!
//! Settings are loaded from flat environment variables and validated once
//! at startup.

mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{CorsConfig, ServerConfig, ServiceAccountConfig, Settings, WebhookConfig};
