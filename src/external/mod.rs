//! External HTTP client shared by all outbound integrations.

pub mod client;

pub use client::HTTP_CLIENT;
