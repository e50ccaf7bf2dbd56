//! Driver domain model.
//!
//! Driver documents are owned by an external registration process; this
//! service only ever reads them, and only cares about the push token.

use serde::{Deserialize, Serialize};

/// A driver document as read from the `drivers` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverRecord {
    /// Device push token registered for this driver, if any
    pub fcm_token: Option<String>,
}

impl DriverRecord {
    /// Returns the push token when one is present and non-empty.
    pub fn usable_token(&self) -> Option<&str> {
        self.fcm_token.as_deref().filter(|t| !t.is_empty())
    }
}
