//! crates/forum_client_core/src/ports.rs
//!
//! Defines the collaborator contracts (traits) the core logic drives.
//! These traits form the boundary of the hexagonal architecture: the core never
//! knows whether a resource comes from HTTP, a fixture, or a test double.

use async_trait::async_trait;

use crate::domain::{
    AuthResponse, Comment, LoginRequest, NewComment, NewPost, NewTopic, Notification, Page,
    Post, PostUpdate, ProfileUpdate, SignupRequest, Topic, User, VoteDirection, VoteOutcome,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the transport (status codes, sockets, JSON).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// Network and server failures: worth a notice and a retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Unexpected(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound(_))
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Resource Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TopicService: Send + Sync {
    async fn list_topics(&self) -> PortResult<Vec<Topic>>;

    async fn get_topic(&self, topic_id: i64) -> PortResult<Topic>;

    async fn create_topic(&self, topic: &NewTopic) -> PortResult<Topic>;

    async fn update_topic(&self, topic_id: i64, topic: &NewTopic) -> PortResult<Topic>;

    async fn delete_topic(&self, topic_id: i64) -> PortResult<()>;
}

#[async_trait]
pub trait PostService: Send + Sync {
    /// Lists the posts of a topic. A query narrows the list; how is up to the server.
    async fn list_posts(&self, topic_id: i64, query: Option<&str>) -> PortResult<Vec<Post>>;

    async fn get_post(&self, post_id: i64) -> PortResult<Post>;

    async fn create_post(&self, post: &NewPost) -> PortResult<Post>;

    async fn update_post(&self, post_id: i64, post: &PostUpdate) -> PortResult<Post>;

    async fn delete_post(&self, post_id: i64) -> PortResult<()>;
}

#[async_trait]
pub trait CommentService: Send + Sync {
    /// Fetches every comment of a post, flat or server-nested.
    async fn list_comments(&self, post_id: i64) -> PortResult<Vec<Comment>>;

    async fn get_comment(&self, comment_id: i64) -> PortResult<Comment>;

    async fn create_comment(&self, comment: &NewComment) -> PortResult<Comment>;

    async fn update_comment(&self, comment_id: i64, content: &str) -> PortResult<Comment>;

    /// Deletes the comment together with its replies.
    async fn delete_comment(&self, comment_id: i64) -> PortResult<()>;
}

#[async_trait]
pub trait VoteService: Send + Sync {
    async fn vote(&self, post_id: i64, direction: VoteDirection) -> PortResult<VoteOutcome>;

    async fn unvote(&self, post_id: i64) -> PortResult<VoteOutcome>;
}

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn list_notifications(&self, page: Page) -> PortResult<Vec<Notification>>;

    /// The server-side unread total, independent of any list page.
    async fn unread_count(&self) -> PortResult<u32>;

    async fn mark_read(&self, notification_id: i64) -> PortResult<()>;

    async fn mark_all_read(&self) -> PortResult<()>;
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn current_user(&self) -> PortResult<User>;

    /// Looks a user up by username or numeric id.
    async fn get_user(&self, identifier: &str) -> PortResult<User>;

    async fn update_profile(&self, update: &ProfileUpdate) -> PortResult<User>;

    async fn user_posts(&self, identifier: &str, page: Page) -> PortResult<Vec<Post>>;

    async fn user_comments(&self, identifier: &str, page: Page) -> PortResult<Vec<Comment>>;
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn signup(&self, request: &SignupRequest) -> PortResult<AuthResponse>;

    async fn login(&self, request: &LoginRequest) -> PortResult<AuthResponse>;
}
