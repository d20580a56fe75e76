//! Builders for the entities used across the unit tests.

use chrono::Utc;

use crate::domain::{Comment, Notification, NotificationKind, Post, User, UserVote};

pub fn user(id: i64) -> User {
    let now = Utc::now();
    User {
        id,
        username: format!("user{}", id),
        email: None,
        bio: None,
        avatar_url: None,
        posts_count: None,
        comments_count: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn post(id: i64) -> Post {
    let now = Utc::now();
    Post {
        id,
        topic_id: 1,
        title: format!("post {}", id),
        content: "body".to_string(),
        created_by: 1,
        creator: user(1),
        created_at: now,
        updated_at: now,
        vote_count: 0,
        user_vote: UserVote::None,
    }
}

pub fn comment(id: i64, parent_id: Option<i64>) -> Comment {
    let now = Utc::now();
    Comment {
        id,
        post_id: 1,
        content: format!("comment {}", id),
        created_by: 1,
        creator: user(1),
        parent_id,
        replies: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn notification(id: i64, is_read: bool) -> Notification {
    Notification {
        id,
        user_id: 1,
        actor_id: 2,
        actor: Some(user(2)),
        kind: NotificationKind::Comment,
        post_id: Some(10),
        comment_id: None,
        post: None,
        comment: None,
        is_read,
        created_at: Utc::now(),
    }
}
