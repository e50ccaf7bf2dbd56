//! Firestore integration: service-account auth and a REST document client.

pub mod auth;
pub mod client;
pub mod value;

pub use auth::TokenProvider;
pub use client::{Document, FirestoreClient, MAX_BATCH_WRITES};
