//! crates/forum_client_core/src/session.rs
//!
//! The authenticated session: token plus current user.
//!
//! Lifecycle is login (create), every request (read), logout (clear). The
//! context is shared explicitly, typically as an `Arc<SessionContext>` handed
//! to the transport adapter.

use std::sync::{PoisonError, RwLock};

use tracing::info;

use crate::domain::{AuthResponse, Comment, Post, Topic, User};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    /// Unknown when the session was resumed from a bare token.
    pub user: Option<User>,
}

#[derive(Debug, Default)]
pub struct SessionContext {
    inner: RwLock<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a session from a previously issued token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(Session {
                token: token.into(),
                user: None,
            })),
        }
    }

    pub fn login(&self, auth: AuthResponse) {
        info!(user_id = auth.user.id, "Session started.");
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(Session {
            token: auth.token,
            user: Some(auth.user),
        });
    }

    pub fn logout(&self) {
        let previous = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            info!("Session cleared.");
        }
    }

    /// Replaces the cached user, e.g. after a profile update.
    /// Ignored when no session is active.
    pub fn set_user(&self, user: User) {
        if let Some(session) = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .as_mut()
        {
            session.user = Some(user);
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.session().map(|s| s.token)
    }

    pub fn user(&self) -> Option<User> {
        self.session().and_then(|s| s.user)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user().map(|u| u.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Edit and delete are offered only to the creator.
    pub fn is_owner<T: Owned>(&self, item: &T) -> bool {
        self.user_id() == Some(item.created_by())
    }
}

/// Entities carrying the id of the user who created them.
pub trait Owned {
    fn created_by(&self) -> i64;
}

impl Owned for Topic {
    fn created_by(&self) -> i64 {
        self.created_by
    }
}

impl Owned for Post {
    fn created_by(&self) -> i64 {
        self.created_by
    }
}

impl Owned for Comment {
    fn created_by(&self) -> i64 {
        self.created_by
    }
}
