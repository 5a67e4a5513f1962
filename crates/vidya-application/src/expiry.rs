//! Notification auto-expiry.
//!
//! Each scheduled notification gets one delayed task keyed by its id.
//! Dismissing a notification cancels its pending task, so a reused or
//! re-scheduled id can never be killed by a stale timer.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Schedules one cancellable expiry per notification id and reports expired
/// ids over a channel for the state owner to apply.
pub struct ExpiryScheduler {
    ttl: Duration,
    expired_tx: mpsc::UnboundedSender<String>,
    pending: HashMap<String, JoinHandle<()>>,
}

impl ExpiryScheduler {
    /// Creates a scheduler with the given display duration and returns the
    /// receiver of expired notification ids.
    pub fn new(ttl: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (expired_tx, expired_rx) = mpsc::unbounded_channel();
        (
            Self {
                ttl,
                expired_tx,
                pending: HashMap::new(),
            },
            expired_rx,
        )
    }

    /// Schedules expiry for a notification id.
    ///
    /// Re-scheduling an id replaces (and cancels) its previous timer.
    pub fn schedule(&mut self, id: impl Into<String>) {
        let id = id.into();
        let ttl = self.ttl;
        let tx = self.expired_tx.clone();
        let task_id = id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            // Receiver gone means the owner shut down; nothing to expire.
            let _ = tx.send(task_id);
        });

        if let Some(previous) = self.pending.insert(id, handle) {
            previous.abort();
        }
    }

    /// Cancels the pending expiry for an explicitly dismissed notification.
    /// Returns false if no timer was pending for the id.
    pub fn cancel(&mut self, id: &str) -> bool {
        match self.pending.remove(id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Number of timers currently pending.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Drop for ExpiryScheduler {
    fn drop(&mut self) {
        for handle in self.pending.values() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_expired_id_is_reported() {
        let (mut scheduler, mut expired) = ExpiryScheduler::new(Duration::from_secs(6));
        scheduler.schedule("note-1");

        tokio::time::advance(Duration::from_secs(7)).await;
        assert_eq!(expired.recv().await.as_deref(), Some("note-1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_expiry() {
        let (mut scheduler, mut expired) = ExpiryScheduler::new(Duration::from_secs(6));
        scheduler.schedule("note-1");
        assert!(scheduler.cancel("note-1"));

        tokio::time::advance(Duration::from_secs(10)).await;
        // Nothing may arrive; try_recv sees an empty (not closed) channel.
        assert!(expired.try_recv().is_err());
        assert!(!scheduler.cancel("note-1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_previous_timer() {
        let (mut scheduler, mut expired) = ExpiryScheduler::new(Duration::from_secs(6));
        scheduler.schedule("note-1");
        tokio::time::advance(Duration::from_secs(5)).await;
        scheduler.schedule("note-1");
        assert_eq!(scheduler.pending_count(), 1);

        // The original timer would have fired at t=6; the replacement fires
        // at t=11 and only one expiry is ever reported.
        tokio::time::advance(Duration::from_secs(7)).await;
        assert_eq!(expired.recv().await.as_deref(), Some("note-1"));
        assert!(expired.try_recv().is_err());
    }
}
