//! services/client/src/views/notification_center.rs
//!
//! The bell: unread badge plus the paged notification list.

use crate::error::ClientError;
use forum_client_core::domain::{Notification, Page};
use forum_client_core::notifications::NotificationReconciler;
use forum_client_core::ports::NotificationService;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub struct NotificationCenter {
    service: Arc<dyn NotificationService>,
    reconciler: Mutex<NotificationReconciler>,
    page_size: u32,
    next_page: Mutex<Page>,
}

impl NotificationCenter {
    pub fn new(service: Arc<dyn NotificationService>, page_size: u32) -> Self {
        Self {
            service,
            reconciler: Mutex::new(NotificationReconciler::new()),
            page_size,
            next_page: Mutex::new(Page::first(page_size)),
        }
    }

    /// Fetches the server's unread total. On failure the previous count stays.
    pub async fn refresh_unread(&self) -> Result<u32, ClientError> {
        let count = self.service.unread_count().await?;
        self.reconciler.lock().await.set_unread_count(count);
        debug!(unread = count, "Unread count refreshed.");
        Ok(count)
    }

    /// Replaces the list with the first page.
    pub async fn load_first_page(&self) -> Result<usize, ClientError> {
        let page = Page::first(self.page_size);
        let batch = self.service.list_notifications(page).await?;
        let loaded = batch.len();
        self.reconciler.lock().await.load(batch);
        *self.next_page.lock().await = page.next();
        Ok(loaded)
    }

    /// Appends the next page. Returns how many new notifications were added;
    /// zero means the list is exhausted.
    pub async fn load_more(&self) -> Result<usize, ClientError> {
        let page = *self.next_page.lock().await;
        let batch = self.service.list_notifications(page).await?;
        let added = self.reconciler.lock().await.append(batch);
        if added > 0 {
            *self.next_page.lock().await = page.next();
        }
        Ok(added)
    }

    /// Marks one notification read.
    ///
    /// The local flag and counter change first. The server call follows and a
    /// failure there is only logged: the local state is not rolled back.
    pub async fn mark_read(&self, notification_id: i64) -> bool {
        let (changed, already_read) = {
            let mut reconciler = self.reconciler.lock().await;
            let already_read = reconciler
                .get(notification_id)
                .map(|n| n.is_read)
                .unwrap_or(false);
            (reconciler.mark_read(notification_id), already_read)
        };
        if already_read {
            return false;
        }
        if let Err(e) = self.service.mark_read(notification_id).await {
            warn!(notification_id, error = %e, "Failed to mark notification read on the server.");
        }
        changed
    }

    pub async fn mark_all_read(&self) {
        self.reconciler.lock().await.mark_all_read();
        if let Err(e) = self.service.mark_all_read().await {
            warn!(error = %e, "Failed to mark all notifications read on the server.");
        }
    }

    pub async fn unread_count(&self) -> u32 {
        self.reconciler.lock().await.unread_count()
    }

    pub async fn badge(&self) -> Option<String> {
        self.reconciler.lock().await.badge()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.reconciler.lock().await.notifications().to_vec()
    }

    /// Drops everything held, e.g. on logout.
    pub async fn clear(&self) {
        self.reconciler.lock().await.clear();
        *self.next_page.lock().await = Page::first(self.page_size);
    }
}
