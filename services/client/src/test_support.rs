//! An in-memory forum standing in for the REST adapter in unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use forum_client_core::domain::{
    AuthResponse, Comment, LoginRequest, NewComment, NewPost, NewTopic, Notification,
    NotificationKind, Page, Post, PostUpdate, ProfileUpdate, SignupRequest, Topic, User,
    UserVote, VoteDirection, VoteOutcome,
};
use forum_client_core::ports::{
    AuthService, CommentService, NotificationService, PortError, PortResult, PostService,
    TopicService, UserService, VoteService,
};
use forum_client_core::session::SessionContext;
use forum_client_core::vote::VoteRequest;
use tokio::sync::Notify;

use crate::config::Config;
use crate::views::state::AppState;

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

pub fn post(id: i64, created_by: i64) -> Post {
    let now = Utc::now();
    Post {
        id,
        topic_id: 1,
        title: format!("post {}", id),
        content: "body".to_string(),
        created_by,
        creator: user(created_by),
        created_at: now,
        updated_at: now,
        vote_count: 0,
        user_vote: UserVote::None,
    }
}

pub fn comment(id: i64, post_id: i64, parent_id: Option<i64>, created_by: i64) -> Comment {
    let now = Utc::now();
    Comment {
        id,
        post_id,
        content: format!("comment {}", id),
        created_by,
        creator: user(created_by),
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
        kind: NotificationKind::Vote,
        post_id: Some(1),
        comment_id: None,
        post: None,
        comment: None,
        is_read,
        created_at: Utc::now(),
    }
}

fn unsupported<T>() -> PortResult<T> {
    Err(PortError::Unexpected("not supported by the fake".to_string()))
}

#[derive(Default)]
pub struct FakeForum {
    pub posts: Mutex<HashMap<i64, Post>>,
    pub comments: Mutex<Vec<Comment>>,
    next_id: AtomicI64,
    pub comment_list_calls: AtomicUsize,

    pub vote_outcomes: Mutex<VecDeque<PortResult<VoteOutcome>>>,
    pub vote_calls: Mutex<Vec<(i64, VoteRequest)>>,
    /// When set, vote calls wait for a notification before answering.
    pub vote_gate: Option<Arc<Notify>>,

    pub notifications: Mutex<Vec<Notification>>,
    pub unread_counts: Mutex<VecDeque<PortResult<u32>>>,
    pub unread_calls: AtomicUsize,
    pub read_calls: Mutex<Vec<i64>>,
    pub mark_all_calls: AtomicUsize,
    pub fail_mark_read: AtomicBool,
}

impl FakeForum {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1000),
            ..Default::default()
        }
    }

    pub fn with_post(self, post: Post) -> Self {
        self.posts.lock().unwrap().insert(post.id, post);
        self
    }

    pub fn with_comments(self, comments: Vec<Comment>) -> Self {
        *self.comments.lock().unwrap() = comments;
        self
    }

    pub fn with_vote_gate(mut self, gate: Arc<Notify>) -> Self {
        self.vote_gate = Some(gate);
        self
    }

    pub fn queue_vote(&self, outcome: PortResult<VoteOutcome>) {
        self.vote_outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn queue_unread(&self, count: PortResult<u32>) {
        self.unread_counts.lock().unwrap().push_back(count);
    }

    pub fn into_state(self, session: Arc<SessionContext>) -> (Arc<Self>, AppState) {
        let fake = Arc::new(self);
        let state = AppState::from_ports(Arc::new(Config::default()), session, fake.clone());
        (fake, state)
    }

    async fn answer_vote(&self, post_id: i64, request: VoteRequest) -> PortResult<VoteOutcome> {
        self.vote_calls.lock().unwrap().push((post_id, request));
        if let Some(gate) = &self.vote_gate {
            gate.notified().await;
        }
        self.vote_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unsupported)
    }
}

#[async_trait]
impl TopicService for FakeForum {
    async fn list_topics(&self) -> PortResult<Vec<Topic>> {
        Ok(Vec::new())
    }

    async fn get_topic(&self, topic_id: i64) -> PortResult<Topic> {
        Err(PortError::NotFound(format!("topic {}", topic_id)))
    }

    async fn create_topic(&self, _topic: &NewTopic) -> PortResult<Topic> {
        unsupported()
    }

    async fn update_topic(&self, _topic_id: i64, _topic: &NewTopic) -> PortResult<Topic> {
        unsupported()
    }

    async fn delete_topic(&self, _topic_id: i64) -> PortResult<()> {
        unsupported()
    }
}

#[async_trait]
impl PostService for FakeForum {
    async fn list_posts(&self, topic_id: i64, _query: Option<&str>) -> PortResult<Vec<Post>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.topic_id == topic_id)
            .cloned()
            .collect())
    }

    async fn get_post(&self, post_id: i64) -> PortResult<Post> {
        self.posts
            .lock()
            .unwrap()
            .get(&post_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("post {}", post_id)))
    }

    async fn create_post(&self, _post: &NewPost) -> PortResult<Post> {
        unsupported()
    }

    async fn update_post(&self, post_id: i64, update: &PostUpdate) -> PortResult<Post> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .get_mut(&post_id)
            .ok_or_else(|| PortError::NotFound(format!("post {}", post_id)))?;
        post.title = update.title.clone();
        post.content = update.content.clone();
        Ok(post.clone())
    }

    async fn delete_post(&self, post_id: i64) -> PortResult<()> {
        self.posts.lock().unwrap().remove(&post_id);
        self.comments.lock().unwrap().retain(|c| c.post_id != post_id);
        Ok(())
    }
}

#[async_trait]
impl CommentService for FakeForum {
    async fn list_comments(&self, post_id: i64) -> PortResult<Vec<Comment>> {
        self.comment_list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn get_comment(&self, comment_id: i64) -> PortResult<Comment> {
        self.comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == comment_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("comment {}", comment_id)))
    }

    async fn create_comment(&self, new: &NewComment) -> PortResult<Comment> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut created = comment(id, new.post_id, new.parent_id, 1);
        created.content = new.content.clone();
        self.comments.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_comment(&self, comment_id: i64, content: &str) -> PortResult<Comment> {
        let mut comments = self.comments.lock().unwrap();
        let found = comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| PortError::NotFound(format!("comment {}", comment_id)))?;
        found.content = content.to_string();
        Ok(found.clone())
    }

    async fn delete_comment(&self, comment_id: i64) -> PortResult<()> {
        let mut comments = self.comments.lock().unwrap();
        let mut doomed = vec![comment_id];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i];
            doomed.extend(
                comments
                    .iter()
                    .filter(|c| c.parent_id == Some(parent))
                    .map(|c| c.id),
            );
            i += 1;
        }
        comments.retain(|c| !doomed.contains(&c.id));
        Ok(())
    }
}

#[async_trait]
impl VoteService for FakeForum {
    async fn vote(&self, post_id: i64, direction: VoteDirection) -> PortResult<VoteOutcome> {
        self.answer_vote(post_id, VoteRequest::Vote(direction)).await
    }

    async fn unvote(&self, post_id: i64) -> PortResult<VoteOutcome> {
        self.answer_vote(post_id, VoteRequest::Unvote).await
    }
}

#[async_trait]
impl NotificationService for FakeForum {
    async fn list_notifications(&self, page: Page) -> PortResult<Vec<Notification>> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn unread_count(&self) -> PortResult<u32> {
        self.unread_calls.fetch_add(1, Ordering::SeqCst);
        let queued = self.unread_counts.lock().unwrap().pop_front();
        match queued {
            Some(result) => result,
            None => Ok(self
                .notifications
                .lock()
                .unwrap()
                .iter()
                .filter(|n| !n.is_read)
                .count() as u32),
        }
    }

    async fn mark_read(&self, notification_id: i64) -> PortResult<()> {
        self.read_calls.lock().unwrap().push(notification_id);
        if self.fail_mark_read.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("503".to_string()));
        }
        Ok(())
    }

    async fn mark_all_read(&self) -> PortResult<()> {
        self.mark_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl UserService for FakeForum {
    async fn current_user(&self) -> PortResult<User> {
        Ok(user(1))
    }

    async fn get_user(&self, identifier: &str) -> PortResult<User> {
        Err(PortError::NotFound(identifier.to_string()))
    }

    async fn update_profile(&self, _update: &ProfileUpdate) -> PortResult<User> {
        unsupported()
    }

    async fn user_posts(&self, _identifier: &str, _page: Page) -> PortResult<Vec<Post>> {
        Ok(Vec::new())
    }

    async fn user_comments(&self, _identifier: &str, _page: Page) -> PortResult<Vec<Comment>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl AuthService for FakeForum {
    async fn signup(&self, _request: &SignupRequest) -> PortResult<AuthResponse> {
        unsupported()
    }

    async fn login(&self, _request: &LoginRequest) -> PortResult<AuthResponse> {
        Ok(AuthResponse {
            token: "token".to_string(),
            user: user(1),
        })
    }
}

/// A session logged in as `user_id`.
pub fn session_for(user_id: i64) -> Arc<SessionContext> {
    let session = SessionContext::new();
    session.login(AuthResponse {
        token: "token".to_string(),
        user: user(user_id),
    });
    Arc::new(session)
}
