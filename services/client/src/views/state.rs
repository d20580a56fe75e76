//! services/client/src/views/state.rs
//!
//! Defines the application's shared state: configuration, session, and one
//! handle per collaborator port.

use crate::adapters::HttpAdapter;
use crate::config::Config;
use crate::error::ClientError;
use forum_client_core::ports::{
    AuthService, CommentService, NotificationService, PostService, TopicService, UserService,
    VoteService,
};
use forum_client_core::session::SessionContext;
use std::sync::Arc;
use tracing::info;

//=========================================================================================
// AppState (Shared Across All Views)
//=========================================================================================

/// The shared application state, created once at startup and passed to all views.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<SessionContext>,
    pub topics: Arc<dyn TopicService>,
    pub posts: Arc<dyn PostService>,
    pub comments: Arc<dyn CommentService>,
    pub votes: Arc<dyn VoteService>,
    pub notifications: Arc<dyn NotificationService>,
    pub users: Arc<dyn UserService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppState {
    /// Wires every port to the REST adapter. A configured token resumes a session.
    pub fn with_http(config: Config) -> Result<Self, ClientError> {
        let session = Arc::new(match &config.token {
            Some(token) => SessionContext::with_token(token.clone()),
            None => SessionContext::new(),
        });
        let http = Arc::new(HttpAdapter::new(
            config.api_url.clone(),
            config.http_timeout,
            session.clone(),
        )?);
        Ok(Self::from_ports(Arc::new(config), session, http))
    }

    /// Loads the user behind a session resumed from a token.
    ///
    /// Ownership checks compare against this user, so without it nothing
    /// counts as one's own. Does nothing without a token or once the user is
    /// known.
    pub async fn resume_session(&self) -> Result<(), ClientError> {
        if self.session.token().is_none() || self.session.user().is_some() {
            return Ok(());
        }
        let user = self.users.current_user().await?;
        info!(user_id = user.id, "Session resumed.");
        self.session.set_user(user);
        Ok(())
    }

    /// Uses one implementation for every port.
    pub fn from_ports<P>(config: Arc<Config>, session: Arc<SessionContext>, ports: Arc<P>) -> Self
    where
        P: TopicService
            + PostService
            + CommentService
            + VoteService
            + NotificationService
            + UserService
            + AuthService
            + 'static,
    {
        Self {
            config,
            session,
            topics: ports.clone(),
            posts: ports.clone(),
            comments: ports.clone(),
            votes: ports.clone(),
            notifications: ports.clone(),
            users: ports.clone(),
            auth: ports,
        }
    }
}
