//! crates/forum_client_core/src/domain.rs
//!
//! Defines the data shapes shared between the core logic and the collaborators.
//! They mirror the JSON payloads exchanged with the forum server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Entities
//=========================================================================================

/// Represents a forum member. Nested inside most other entities as a `creator` snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub posts_count: Option<i64>,
    #[serde(default)]
    pub comments_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A top-level discussion category containing posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_by: i64,
    pub creator: User,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A votable discussion thread within a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub topic_id: i64,
    pub title: String,
    pub content: String,
    pub created_by: i64,
    pub creator: User,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub user_vote: UserVote,
}

/// A reply unit attached to a post, optionally nested under another comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_by: i64,
    pub creator: User,
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Only populated after tree assembly, or when the server nests replies itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<Comment>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Vote,
    Comment,
    Reply,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    /// The recipient.
    pub user_id: i64,
    pub actor_id: i64,
    #[serde(default)]
    pub actor: Option<User>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub comment_id: Option<i64>,
    #[serde(default)]
    pub post: Option<Post>,
    #[serde(default)]
    pub comment: Option<Comment>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// The post this notification links to, if any.
    pub fn target_post_id(&self) -> Option<i64> {
        self.post_id.or_else(|| self.post.as_ref().map(|p| p.id))
    }

    /// A one-line description such as `alice commented on your post "Hello"`.
    pub fn summary(&self) -> String {
        let actor = self
            .actor
            .as_ref()
            .map(|a| a.username.as_str())
            .unwrap_or("Someone");
        let title = self
            .post
            .as_ref()
            .map(|p| p.title.as_str())
            .unwrap_or("your post");
        match self.kind {
            NotificationKind::Vote => format!("{} upvoted your post \"{}\"", actor, title),
            NotificationKind::Comment => {
                format!("{} commented on your post \"{}\"", actor, title)
            }
            NotificationKind::Reply => format!("{} replied to your comment", actor),
        }
    }
}

//=========================================================================================
// Votes
//=========================================================================================

/// The requesting user's current vote on a post. Travels as `-1`, `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum UserVote {
    Down,
    #[default]
    None,
    Up,
}

impl TryFrom<i8> for UserVote {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(UserVote::Down),
            0 => Ok(UserVote::None),
            1 => Ok(UserVote::Up),
            other => Err(format!("invalid user_vote {}, expected -1, 0 or 1", other)),
        }
    }
}

impl From<UserVote> for i8 {
    fn from(vote: UserVote) -> Self {
        match vote {
            UserVote::Down => -1,
            UserVote::None => 0,
            UserVote::Up => 1,
        }
    }
}

/// The direction of a vote button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// The `vote_type` value sent to the server.
    pub fn value(self) -> i8 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

impl From<VoteDirection> for UserVote {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => UserVote::Up,
            VoteDirection::Down => UserVote::Down,
        }
    }
}

/// The server's answer to a vote or un-vote: the authoritative aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub vote_count: i64,
    #[serde(default)]
    pub user_vote: UserVote,
}

//=========================================================================================
// Request Payloads
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTopic {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPost {
    pub topic_id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub post_id: i64,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by signup and login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// A `limit`/`offset` window over a paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    pub fn first(limit: u32) -> Self {
        Self { limit, offset: 0 }
    }

    pub fn next(self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset + self.limit,
        }
    }
}
