//! services/client/src/views/unread_poller.rs
//!
//! Background task that keeps the unread badge current.

use crate::views::notification_center::NotificationCenter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Polls the unread count on a fixed interval until stopped.
///
/// The first poll happens immediately. A failed poll is logged and the
/// previous count stays on the badge until the next tick.
pub struct UnreadPoller {
    cancellation_token: CancellationToken,
    handle: JoinHandle<()>,
}

impl UnreadPoller {
    pub fn spawn(center: Arc<NotificationCenter>, every: Duration) -> Self {
        let cancellation_token = CancellationToken::new();
        let token = cancellation_token.clone();

        let handle = tokio::spawn(async move {
            info!(interval_secs = every.as_secs(), "Unread poller started.");
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = center.refresh_unread().await {
                            warn!(error = %e, "Unread poll failed, keeping previous count.");
                        }
                    }
                }
            }
            info!("Unread poller stopped.");
        });

        Self {
            cancellation_token,
            handle,
        }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Cancels the task and waits for it to finish.
    pub async fn stop(self) {
        self.cancellation_token.cancel();
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Unread poller ended abnormally.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeForum;
    use forum_client_core::ports::PortError;
    use std::sync::atomic::Ordering;

    #[tokio::test(start_paused = true)]
    async fn polls_every_interval_until_stopped() {
        let fake = Arc::new(FakeForum::new());
        fake.queue_unread(Ok(2));
        fake.queue_unread(Err(PortError::Unexpected("502".to_string())));
        fake.queue_unread(Ok(5));
        let center = Arc::new(NotificationCenter::new(fake.clone(), 20));

        let poller = UnreadPoller::spawn(center.clone(), Duration::from_secs(30));
        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(fake.unread_calls.load(Ordering::SeqCst), 2);
        assert_eq!(center.unread_count().await, 2);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(fake.unread_calls.load(Ordering::SeqCst), 3);
        assert_eq!(center.badge().await.as_deref(), Some("5"));

        poller.stop().await;
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(fake.unread_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelling_through_the_token_ends_the_task() {
        let fake = Arc::new(FakeForum::new());
        let center = Arc::new(NotificationCenter::new(fake.clone(), 20));

        let poller = UnreadPoller::spawn(center, Duration::from_secs(30));
        poller.cancellation_token().cancel();
        tokio::time::sleep(Duration::from_secs(90)).await;

        assert!(fake.unread_calls.load(Ordering::SeqCst) <= 1);
        poller.stop().await;
    }
}
