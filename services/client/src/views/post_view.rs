//! services/client/src/views/post_view.rs
//!
//! One open post: the post itself, its comment tree, and its vote buttons.
//!
//! Every comment mutation (new comment, reply, edit, delete) is followed by a
//! full refetch and rebuild of the tree, so what is shown always comes from a
//! single server snapshot. Votes settle from their own response instead, see
//! [`VoteToggle`]; the post handed out always carries the toggle's values.

use crate::error::ClientError;
use crate::views::state::AppState;
use crate::views::vote_toggle::VoteToggle;
use forum_client_core::comment_tree::CommentTree;
use forum_client_core::domain::{Comment, Post};
use forum_client_core::ports::{CommentService, PortError, PostService};
use forum_client_core::session::SessionContext;
use forum_client_core::validation;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

struct Snapshot {
    post: Post,
    tree: CommentTree,
}

pub struct PostView {
    post_id: i64,
    posts: Arc<dyn PostService>,
    comments: Arc<dyn CommentService>,
    session: Arc<SessionContext>,
    vote: VoteToggle,
    snapshot: Mutex<Snapshot>,
    open: AtomicBool,
}

impl PostView {
    /// Fetches the post and its comments together.
    ///
    /// A missing post surfaces as a not-found error, which the caller treats as
    /// terminal for this view.
    pub async fn open(app: &AppState, post_id: i64) -> Result<Self, ClientError> {
        let (post, comments) = futures::try_join!(
            app.posts.get_post(post_id),
            app.comments.list_comments(post_id)
        )?;
        let tree = CommentTree::build(comments);
        info!(post_id, comments = tree.total_count(), "Post opened.");

        Ok(Self {
            post_id,
            posts: app.posts.clone(),
            comments: app.comments.clone(),
            session: app.session.clone(),
            vote: VoteToggle::for_post(app.votes.clone(), &post),
            snapshot: Mutex::new(Snapshot { post, tree }),
            open: AtomicBool::new(true),
        })
    }

    pub fn post_id(&self) -> i64 {
        self.post_id
    }

    pub fn vote(&self) -> &VoteToggle {
        &self.vote
    }

    /// The post, with the vote count and own vote taken from the vote buttons.
    pub async fn post(&self) -> Post {
        let mut post = self.snapshot.lock().await.post.clone();
        let votes = self.vote.snapshot().await;
        post.vote_count = votes.vote_count();
        post.user_vote = votes.user_vote();
        post
    }

    pub async fn tree(&self) -> CommentTree {
        self.snapshot.lock().await.tree.clone()
    }

    pub async fn total_comments(&self) -> usize {
        self.snapshot.lock().await.tree.total_count()
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Leaving the view. Responses that arrive afterwards are discarded.
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    /// Refetches the post and its comments and rebuilds the tree.
    ///
    /// The refetched vote values are adopted unless a vote is in flight.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let (post, comments) = futures::try_join!(
            self.posts.get_post(self.post_id),
            self.comments.list_comments(self.post_id)
        )?;
        if !self.is_open() {
            debug!(post_id = self.post_id, "View closed, dropping refreshed post.");
            return Ok(());
        }
        self.vote.sync_from(&post).await;
        let tree = CommentTree::build(comments);
        let mut snapshot = self.snapshot.lock().await;
        snapshot.post = post;
        snapshot.tree = tree;
        Ok(())
    }

    /// Posts a top-level comment.
    pub async fn add_comment(&self, content: &str) -> Result<Comment, ClientError> {
        let new = validation::new_comment(self.post_id, content, None)?;
        let created = self.comments.create_comment(&new).await?;
        self.refresh().await?;
        Ok(created)
    }

    /// Replies under `parent_id`, if the reply action is offered there.
    pub async fn reply(&self, parent_id: i64, content: &str) -> Result<Comment, ClientError> {
        let new = validation::new_comment(self.post_id, content, Some(parent_id))?;
        if !self.snapshot.lock().await.tree.can_reply(parent_id) {
            return Err(ClientError::ReplyTooDeep(parent_id));
        }
        let created = self.comments.create_comment(&new).await?;
        self.refresh().await?;
        Ok(created)
    }

    pub async fn edit_comment(&self, comment_id: i64, content: &str) -> Result<Comment, ClientError> {
        let content = validation::comment_content(content)?;
        self.ensure_comment_owner(comment_id).await?;
        let updated = self.comments.update_comment(comment_id, &content).await?;
        self.refresh().await?;
        Ok(updated)
    }

    /// Deletes a comment and its replies. Returns the ids that were shown
    /// under it before the refetch.
    pub async fn delete_comment(&self, comment_id: i64) -> Result<Vec<i64>, ClientError> {
        self.ensure_comment_owner(comment_id).await?;
        let removed = self.snapshot.lock().await.tree.subtree_ids(comment_id);
        self.comments.delete_comment(comment_id).await?;
        self.refresh().await?;
        Ok(removed)
    }

    pub async fn edit_post(&self, title: &str, content: &str) -> Result<Post, ClientError> {
        let update = validation::post_update(title, content)?;
        let current = self.post().await;
        if !self.session.is_owner(&current) {
            return Err(ClientError::NotOwner(format!("post {}", self.post_id)));
        }
        let updated = self.posts.update_post(self.post_id, &update).await?;
        if self.is_open() {
            self.vote.sync_from(&updated).await;
            self.snapshot.lock().await.post = updated.clone();
        }
        Ok(updated)
    }

    /// Deletes the post; its comments go with it on the server. Closes the view.
    pub async fn delete_post(&self) -> Result<(), ClientError> {
        let current = self.post().await;
        if !self.session.is_owner(&current) {
            return Err(ClientError::NotOwner(format!("post {}", self.post_id)));
        }
        self.posts.delete_post(self.post_id).await?;
        self.close();
        info!(post_id = self.post_id, "Post deleted.");
        Ok(())
    }

    async fn ensure_comment_owner(&self, comment_id: i64) -> Result<(), ClientError> {
        let snapshot = self.snapshot.lock().await;
        let node = snapshot
            .tree
            .get(comment_id)
            .ok_or_else(|| PortError::NotFound(format!("comment {}", comment_id)))?;
        if !self.session.is_owner(&node.comment) {
            return Err(ClientError::NotOwner(format!("comment {}", comment_id)));
        }
        Ok(())
    }
}
