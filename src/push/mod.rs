//! Push-notification provider abstraction.
//!
//! A provider fans one payload out to many device tokens and reports a
//! per-token tally instead of failing the whole call when individual
//! tokens are invalid or expired.

mod fcm;

pub use fcm::FcmProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;

/// Per-token delivery tally for one multicast send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MulticastSummary {
    /// Tokens the provider accepted the message for
    pub success_count: u32,
    /// Tokens the provider rejected (invalid, expired, unreachable)
    pub failure_count: u32,
}

impl MulticastSummary {
    /// True when every token was accepted.
    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0
    }
}

/// Trait for multicast push providers.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Sends `{title, body}` as a data payload to every token, attempting
    /// per-token delivery and tallying the outcomes.
    async fn send_multicast(
        &self,
        tokens: &[String],
        title: &str,
        body: &str,
    ) -> AppResult<MulticastSummary>;

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_succeeded() {
        let summary = MulticastSummary {
            success_count: 3,
            failure_count: 0,
        };
        assert!(summary.all_succeeded());
    }

    #[test]
    fn test_partial_failure_not_all_succeeded() {
        let summary = MulticastSummary {
            success_count: 2,
            failure_count: 1,
        };
        assert!(!summary.all_succeeded());
    }
}
