//! Notification broadcast and retention service.
//!
//! Broadcasting reads every registered driver token, issues one multicast
//! push, and appends a history record for the attempt. The retention sweep
//! deletes history records older than seven days.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};

use crate::error::{AppError, AppResult};
use crate::models::NewNotificationRecord;
use crate::push::{MulticastSummary, PushProvider};
use crate::repositories::{DriverRepository, NotificationRepository};

/// How long notification records are kept before the sweep removes them.
const RETENTION: SignedDuration = SignedDuration::from_hours(7 * 24);

/// Cutoff for the retention sweep: records created strictly before this
/// instant are deleted, records at exactly the boundary are retained.
pub fn retention_cutoff(now: Timestamp) -> Timestamp {
    now.saturating_sub(RETENTION)
        .expect("saturating_sub with SignedDuration is infallible")
}

/// Drives push broadcasts and history retention.
#[derive(Clone)]
pub struct NotificationService {
    drivers: Arc<dyn DriverRepository>,
    notifications: Arc<dyn NotificationRepository>,
    push: Arc<dyn PushProvider>,
}

impl NotificationService {
    pub fn new(
        drivers: Arc<dyn DriverRepository>,
        notifications: Arc<dyn NotificationRepository>,
        push: Arc<dyn PushProvider>,
    ) -> Self {
        Self {
            drivers,
            notifications,
            push,
        }
    }

    /// Broadcasts `{title, body}` to every driver with a usable token.
    ///
    /// # Errors
    /// - `Validation` when title or body is empty (checked before any store
    ///   access)
    /// - `NoRecipients` when no driver has a usable token (no record is
    ///   written)
    /// - `Notification` for everything else: token read, multicast
    ///   transport, or the history write. Partial completion is not rolled
    ///   back; a record write failure after a successful multicast still
    ///   surfaces as `Notification`.
    pub async fn broadcast(&self, title: &str, body: &str) -> AppResult<MulticastSummary> {
        if title.is_empty() {
            return Err(AppError::Validation {
                field: "title".to_string(),
                reason: "Title and body required".to_string(),
            });
        }
        if body.is_empty() {
            return Err(AppError::Validation {
                field: "body".to_string(),
                reason: "Title and body required".to_string(),
            });
        }

        let drivers = self
            .drivers
            .list_drivers()
            .await
            .map_err(into_notification)?;

        let tokens: Vec<String> = drivers
            .iter()
            .filter_map(|d| d.usable_token())
            .map(String::from)
            .collect();

        if tokens.is_empty() {
            return Err(AppError::NoRecipients);
        }

        let summary = self
            .push
            .send_multicast(&tokens, title, body)
            .await
            .map_err(into_notification)?;

        // The record documents the attempt; it is written even when some
        // (or all) per-token deliveries failed.
        self.notifications
            .append(NewNotificationRecord {
                title: title.to_string(),
                body: body.to_string(),
                created_at: Timestamp::now(),
            })
            .await
            .map_err(into_notification)?;

        tracing::info!(
            tokens = tokens.len(),
            success = summary.success_count,
            failure = summary.failure_count,
            "Broadcast sent to drivers"
        );

        Ok(summary)
    }

    /// Deletes notification records older than the retention window.
    ///
    /// Returns the number of records deleted; the HTTP response does not
    /// expose the count, it is logged here.
    pub async fn cleanup_old_notifications(&self) -> AppResult<usize> {
        let cutoff = retention_cutoff(Timestamp::now());

        let expired = self
            .notifications
            .find_created_before(cutoff)
            .await
            .map_err(into_cleanup)?;

        self.notifications
            .delete(&expired)
            .await
            .map_err(into_cleanup)?;

        tracing::info!(deleted = expired.len(), "Old notifications cleaned up");
        Ok(expired.len())
    }
}

/// Collapses any broadcast-stage failure into `Notification`, preserving
/// the cause for server-side logging.
fn into_notification(error: AppError) -> AppError {
    match error {
        e @ AppError::Notification { .. } => e,
        other => AppError::Notification {
            source: anyhow::Error::new(other),
        },
    }
}

/// Collapses any sweep-stage failure into `Cleanup`.
fn into_cleanup(error: AppError) -> AppError {
    match error {
        e @ AppError::Cleanup { .. } => e,
        other => AppError::Cleanup {
            source: anyhow::Error::new(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DriverRecord;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ========================================================================
    // In-memory doubles
    // ========================================================================

    struct StubDrivers {
        drivers: Vec<DriverRecord>,
        reads: AtomicUsize,
    }

    impl StubDrivers {
        fn new(tokens: Vec<Option<&str>>) -> Self {
            Self {
                drivers: tokens
                    .into_iter()
                    .map(|t| DriverRecord {
                        fcm_token: t.map(String::from),
                    })
                    .collect(),
                reads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DriverRepository for StubDrivers {
        async fn list_drivers(&self) -> AppResult<Vec<DriverRecord>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.drivers.clone())
        }
    }

    #[derive(Default)]
    struct InMemoryNotifications {
        appended: Mutex<Vec<NewNotificationRecord>>,
        stored: Mutex<Vec<(String, Timestamp)>>,
        deleted: Mutex<Vec<String>>,
    }

    impl InMemoryNotifications {
        fn seed(&self, id: &str, created_at: Timestamp) {
            self.stored.lock().unwrap().push((id.to_string(), created_at));
        }

        fn append_count(&self) -> usize {
            self.appended.lock().unwrap().len()
        }

        fn remaining_ids(&self) -> Vec<String> {
            self.stored.lock().unwrap().iter().map(|(id, _)| id.clone()).collect()
        }
    }

    #[async_trait]
    impl NotificationRepository for InMemoryNotifications {
        async fn append(&self, record: NewNotificationRecord) -> AppResult<()> {
            let created_at = record.created_at;
            let id = format!("n{}", self.append_count());
            self.appended.lock().unwrap().push(record);
            self.seed(&id, created_at);
            Ok(())
        }

        async fn find_created_before(&self, cutoff: Timestamp) -> AppResult<Vec<String>> {
            // Strict inequality, matching the store's LESS_THAN filter.
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, created)| *created < cutoff)
                .map(|(id, _)| id.clone())
                .collect())
        }

        async fn delete(&self, ids: &[String]) -> AppResult<()> {
            self.stored
                .lock()
                .unwrap()
                .retain(|(id, _)| !ids.contains(id));
            self.deleted.lock().unwrap().extend(ids.iter().cloned());
            Ok(())
        }
    }

    struct StubPush {
        summary: MulticastSummary,
        sent_to: Mutex<Vec<String>>,
    }

    impl StubPush {
        fn new(summary: MulticastSummary) -> Self {
            Self {
                summary,
                sent_to: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PushProvider for StubPush {
        async fn send_multicast(
            &self,
            tokens: &[String],
            _title: &str,
            _body: &str,
        ) -> AppResult<MulticastSummary> {
            self.sent_to.lock().unwrap().extend(tokens.iter().cloned());
            Ok(self.summary)
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    struct FailingPush;

    #[async_trait]
    impl PushProvider for FailingPush {
        async fn send_multicast(
            &self,
            _tokens: &[String],
            _title: &str,
            _body: &str,
        ) -> AppResult<MulticastSummary> {
            Err(AppError::Notification {
                source: anyhow::anyhow!("provider unreachable"),
            })
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn service(
        drivers: Arc<StubDrivers>,
        notifications: Arc<InMemoryNotifications>,
        push: Arc<dyn PushProvider>,
    ) -> NotificationService {
        NotificationService::new(drivers, notifications, push)
    }

    fn ok_summary() -> MulticastSummary {
        MulticastSummary {
            success_count: 2,
            failure_count: 0,
        }
    }

    // ========================================================================
    // Broadcast
    // ========================================================================

    #[tokio::test]
    async fn test_empty_title_rejected_before_store_access() {
        let drivers = Arc::new(StubDrivers::new(vec![Some("tok-1")]));
        let notifications = Arc::new(InMemoryNotifications::default());
        let svc = service(
            drivers.clone(),
            notifications.clone(),
            Arc::new(StubPush::new(ok_summary())),
        );

        let result = svc.broadcast("", "body").await;

        assert!(matches!(result, Err(AppError::Validation { ref field, .. }) if field == "title"));
        assert_eq!(drivers.reads.load(Ordering::SeqCst), 0);
        assert_eq!(notifications.append_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_body_rejected_before_store_access() {
        let drivers = Arc::new(StubDrivers::new(vec![Some("tok-1")]));
        let notifications = Arc::new(InMemoryNotifications::default());
        let svc = service(
            drivers.clone(),
            notifications.clone(),
            Arc::new(StubPush::new(ok_summary())),
        );

        let result = svc.broadcast("title", "").await;

        assert!(matches!(result, Err(AppError::Validation { ref field, .. }) if field == "body"));
        assert_eq!(drivers.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_documents_without_tokens_are_excluded() {
        let drivers = Arc::new(StubDrivers::new(vec![
            Some("tok-1"),
            None,
            Some(""),
            Some("tok-2"),
        ]));
        let notifications = Arc::new(InMemoryNotifications::default());
        let push = Arc::new(StubPush::new(ok_summary()));
        let svc = service(drivers, notifications, push.clone());

        svc.broadcast("title", "body").await.unwrap();

        let sent = push.sent_to.lock().unwrap().clone();
        assert_eq!(sent, vec!["tok-1".to_string(), "tok-2".to_string()]);
    }

    #[tokio::test]
    async fn test_no_usable_tokens_is_no_recipients_and_writes_nothing() {
        let drivers = Arc::new(StubDrivers::new(vec![None, Some("")]));
        let notifications = Arc::new(InMemoryNotifications::default());
        let svc = service(
            drivers,
            notifications.clone(),
            Arc::new(StubPush::new(ok_summary())),
        );

        let result = svc.broadcast("title", "body").await;

        assert!(matches!(result, Err(AppError::NoRecipients)));
        assert_eq!(notifications.append_count(), 0);
    }

    #[tokio::test]
    async fn test_partial_delivery_failures_still_record_one_sent_entry() {
        let drivers = Arc::new(StubDrivers::new(vec![Some("tok-1"), Some("tok-2")]));
        let notifications = Arc::new(InMemoryNotifications::default());
        let svc = service(
            drivers,
            notifications.clone(),
            Arc::new(StubPush::new(MulticastSummary {
                success_count: 1,
                failure_count: 1,
            })),
        );

        let summary = svc.broadcast("title", "body").await.unwrap();

        assert_eq!(summary.failure_count, 1);
        assert_eq!(notifications.append_count(), 1);
        let appended = notifications.appended.lock().unwrap();
        assert_eq!(appended[0].title, "title");
        assert_eq!(appended[0].body, "body");
    }

    #[tokio::test]
    async fn test_push_failure_surfaces_as_notification_and_writes_nothing() {
        let drivers = Arc::new(StubDrivers::new(vec![Some("tok-1")]));
        let notifications = Arc::new(InMemoryNotifications::default());
        let svc = service(drivers, notifications.clone(), Arc::new(FailingPush));

        let result = svc.broadcast("title", "body").await;

        assert!(matches!(result, Err(AppError::Notification { .. })));
        assert_eq!(notifications.append_count(), 0);
    }

    // ========================================================================
    // Retention sweep
    // ========================================================================

    #[test]
    fn test_retention_cutoff_is_seven_days() {
        let now: Timestamp = "2025-03-10T12:00:00Z".parse().unwrap();
        let expected: Timestamp = "2025-03-03T12:00:00Z".parse().unwrap();
        assert_eq!(retention_cutoff(now), expected);
    }

    #[tokio::test]
    async fn test_cleanup_deletes_only_expired_records() {
        let now = Timestamp::now();
        let notifications = Arc::new(InMemoryNotifications::default());
        notifications.seed("old", now - SignedDuration::from_hours(8 * 24));
        notifications.seed("fresh", now - SignedDuration::from_hours(6 * 24));

        let svc = service(
            Arc::new(StubDrivers::new(vec![])),
            notifications.clone(),
            Arc::new(StubPush::new(ok_summary())),
        );

        let deleted = svc.cleanup_old_notifications().await.unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(notifications.remaining_ids(), vec!["fresh".to_string()]);
    }

    #[tokio::test]
    async fn test_boundary_record_is_retained_by_strict_inequality() {
        // Exercised against the in-memory double, which mirrors the store's
        // strict LESS_THAN filter.
        let cutoff: Timestamp = "2025-03-03T12:00:00Z".parse().unwrap();
        let notifications = InMemoryNotifications::default();
        notifications.seed("at-boundary", cutoff);
        notifications.seed("before", cutoff - SignedDuration::from_secs(1));

        let expired = notifications.find_created_before(cutoff).await.unwrap();
        assert_eq!(expired, vec!["before".to_string()]);
    }

    #[tokio::test]
    async fn test_record_written_today_is_swept_eight_days_later() {
        // Round trip: broadcast writes the record now; a sweep with an
        // eight-days-later cutoff removes it.
        let drivers = Arc::new(StubDrivers::new(vec![Some("tok-1")]));
        let notifications = Arc::new(InMemoryNotifications::default());
        let svc = service(
            drivers,
            notifications.clone(),
            Arc::new(StubPush::new(ok_summary())),
        );

        svc.broadcast("title", "body").await.unwrap();
        assert_eq!(notifications.remaining_ids().len(), 1);

        let eight_days_on = Timestamp::now() + SignedDuration::from_hours(8 * 24);
        let expired = notifications
            .find_created_before(retention_cutoff(eight_days_on))
            .await
            .unwrap();
        notifications.delete(&expired).await.unwrap();

        assert!(notifications.remaining_ids().is_empty());
    }
}
