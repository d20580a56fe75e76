//! services/client/src/adapters/posts.rs
//!
//! Implements the `PostService` port over `/topics/{id}/posts` and `/posts`.

use async_trait::async_trait;
use forum_client_core::domain::{NewPost, Post, PostUpdate};
use forum_client_core::ports::{PortResult, PostService};
use reqwest::Method;

use super::http::HttpAdapter;

#[async_trait]
impl PostService for HttpAdapter {
    async fn list_posts(&self, topic_id: i64, query: Option<&str>) -> PortResult<Vec<Post>> {
        let mut request = self.request(Method::GET, &format!("/topics/{}/posts", topic_id));
        // Only send `q` when there is something to search for.
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            request = request.query(&[("q", q)]);
        }
        self.send_json(request).await
    }

    async fn get_post(&self, post_id: i64) -> PortResult<Post> {
        self.send_json(self.request(Method::GET, &format!("/posts/{}", post_id)))
            .await
    }

    async fn create_post(&self, post: &NewPost) -> PortResult<Post> {
        self.send_json(self.request(Method::POST, "/posts").json(post))
            .await
    }

    async fn update_post(&self, post_id: i64, post: &PostUpdate) -> PortResult<Post> {
        self.send_json(self.request(Method::PUT, &format!("/posts/{}", post_id)).json(post))
            .await
    }

    async fn delete_post(&self, post_id: i64) -> PortResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/posts/{}", post_id)))
            .await
    }
}
