//! services/client/src/adapters/users.rs
//!
//! Implements the `UserService` port over `/users`.

use async_trait::async_trait;
use forum_client_core::domain::{Comment, Page, Post, ProfileUpdate, User};
use forum_client_core::ports::{PortResult, UserService};
use reqwest::Method;

use super::http::HttpAdapter;

#[async_trait]
impl UserService for HttpAdapter {
    async fn current_user(&self) -> PortResult<User> {
        self.send_json(self.request(Method::GET, "/users/me")).await
    }

    async fn get_user(&self, identifier: &str) -> PortResult<User> {
        self.send_json(self.request(Method::GET, &format!("/users/{}", identifier)))
            .await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> PortResult<User> {
        let user: User = self
            .send_json(self.request(Method::PUT, "/users/me").json(update))
            .await?;
        self.session().set_user(user.clone());
        Ok(user)
    }

    async fn user_posts(&self, identifier: &str, page: Page) -> PortResult<Vec<Post>> {
        let request = self
            .request(Method::GET, &format!("/users/{}/posts", identifier))
            .query(&[("limit", page.limit), ("offset", page.offset)]);
        self.send_json(request).await
    }

    async fn user_comments(&self, identifier: &str, page: Page) -> PortResult<Vec<Comment>> {
        let request = self
            .request(Method::GET, &format!("/users/{}/comments", identifier))
            .query(&[("limit", page.limit), ("offset", page.offset)]);
        self.send_json(request).await
    }
}
