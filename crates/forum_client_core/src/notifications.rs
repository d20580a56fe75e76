//! crates/forum_client_core/src/notifications.rs
//!
//! Reconciles polled notification batches with local read flags.
//!
//! Two things are tracked: the working set (whatever list pages have been
//! loaded) and the unread counter. The counter follows the dedicated
//! unread-count fetch once one has been applied, because a list page is only
//! a subset of what the server holds. Read flips are applied locally right
//! away; the matching server call is fire-and-forget.

use std::collections::HashSet;

use crate::domain::Notification;

/// Above this the badge reads `9+`.
pub const BADGE_CAP: u32 = 9;

#[derive(Debug, Clone, Default)]
pub struct NotificationReconciler {
    notifications: Vec<Notification>,
    unread: u32,
    /// Set once a server-side unread total has been applied.
    server_counted: bool,
}

impl NotificationReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the working set with a freshly fetched first page.
    pub fn load(&mut self, batch: Vec<Notification>) {
        self.notifications = batch;
        if !self.server_counted {
            self.unread = self.unread_in_list();
        }
    }

    /// Adds the next page, skipping notifications already held.
    /// Returns how many were added.
    pub fn append(&mut self, batch: Vec<Notification>) -> usize {
        let held: HashSet<i64> = self.notifications.iter().map(|n| n.id).collect();
        let before = self.notifications.len();
        self.notifications
            .extend(batch.into_iter().filter(|n| !held.contains(&n.id)));
        if !self.server_counted {
            self.unread = self.unread_in_list();
        }
        self.notifications.len() - before
    }

    /// Applies the total from the unread-count fetch.
    pub fn set_unread_count(&mut self, count: u32) {
        self.unread = count;
        self.server_counted = true;
    }

    /// Marks one notification read. Returns `true` if it was held and unread,
    /// in which case the counter drops by one (never below zero).
    pub fn mark_read(&mut self, notification_id: i64) -> bool {
        let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
        else {
            return false;
        };
        if notification.is_read {
            return false;
        }
        notification.is_read = true;
        self.unread = self.unread.saturating_sub(1);
        true
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
        self.unread = 0;
    }

    /// Forgets everything, e.g. on logout.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn unread_count(&self) -> u32 {
        self.unread
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn get(&self, notification_id: i64) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == notification_id)
    }

    /// Unread entries among the loaded ones only.
    pub fn unread_in_list(&self) -> u32 {
        self.notifications.iter().filter(|n| !n.is_read).count() as u32
    }

    /// Text for the bell badge, `None` when there is nothing unread.
    pub fn badge(&self) -> Option<String> {
        match self.unread {
            0 => None,
            n if n > BADGE_CAP => Some(format!("{}+", BADGE_CAP)),
            n => Some(n.to_string()),
        }
    }
}
