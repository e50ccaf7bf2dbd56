//! Driver Relay Library
//!
//! Core library modules for the driver-relay backend: a small relay that
//! forwards driver-issue reports to a chat webhook, broadcasts push
//! notifications to registered driver devices, and prunes notification
//! history.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod firestore;
pub mod models;
pub mod push;
pub mod repositories;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
