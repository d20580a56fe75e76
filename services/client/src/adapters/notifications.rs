//! services/client/src/adapters/notifications.rs
//!
//! Implements the `NotificationService` port over `/notifications`.

use async_trait::async_trait;
use forum_client_core::domain::{Notification, Page};
use forum_client_core::ports::{NotificationService, PortResult};
use reqwest::Method;
use serde::Deserialize;

use super::http::HttpAdapter;

#[derive(Deserialize)]
struct UnreadCount {
    unread_count: u32,
}

#[async_trait]
impl NotificationService for HttpAdapter {
    async fn list_notifications(&self, page: Page) -> PortResult<Vec<Notification>> {
        let request = self
            .request(Method::GET, "/notifications")
            .query(&[("limit", page.limit), ("offset", page.offset)]);
        self.send_json(request).await
    }

    async fn unread_count(&self) -> PortResult<u32> {
        let body: UnreadCount = self
            .send_json(self.request(Method::GET, "/notifications/unread-count"))
            .await?;
        Ok(body.unread_count)
    }

    async fn mark_read(&self, notification_id: i64) -> PortResult<()> {
        self.send_empty(self.request(
            Method::PUT,
            &format!("/notifications/{}/read", notification_id),
        ))
        .await
    }

    async fn mark_all_read(&self) -> PortResult<()> {
        self.send_empty(self.request(Method::PUT, "/notifications/mark-all-read"))
            .await
    }
}
