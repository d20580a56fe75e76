//! services/client/src/adapters/comments.rs
//!
//! Implements the `CommentService` port over `/posts/{id}/comments` and `/comments`.

use async_trait::async_trait;
use forum_client_core::domain::{Comment, NewComment};
use forum_client_core::ports::{CommentService, PortResult};
use reqwest::Method;
use serde::Serialize;

use super::http::HttpAdapter;

#[derive(Serialize)]
struct CommentUpdate<'a> {
    content: &'a str,
}

#[async_trait]
impl CommentService for HttpAdapter {
    async fn list_comments(&self, post_id: i64) -> PortResult<Vec<Comment>> {
        self.send_json(self.request(Method::GET, &format!("/posts/{}/comments", post_id)))
            .await
    }

    async fn get_comment(&self, comment_id: i64) -> PortResult<Comment> {
        self.send_json(self.request(Method::GET, &format!("/comments/{}", comment_id)))
            .await
    }

    async fn create_comment(&self, comment: &NewComment) -> PortResult<Comment> {
        self.send_json(self.request(Method::POST, "/comments").json(comment))
            .await
    }

    async fn update_comment(&self, comment_id: i64, content: &str) -> PortResult<Comment> {
        self.send_json(
            self.request(Method::PUT, &format!("/comments/{}", comment_id))
                .json(&CommentUpdate { content }),
        )
        .await
    }

    async fn delete_comment(&self, comment_id: i64) -> PortResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/comments/{}", comment_id)))
            .await
    }
}
