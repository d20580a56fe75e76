//! services/client/src/adapters/auth.rs
//!
//! Implements the `AuthService` port over `/auth`. A successful signup or
//! login starts the session the adapter attaches to later requests.

use async_trait::async_trait;
use forum_client_core::domain::{AuthResponse, LoginRequest, SignupRequest};
use forum_client_core::ports::{AuthService, PortResult};
use reqwest::Method;
use tracing::info;

use super::http::HttpAdapter;

#[async_trait]
impl AuthService for HttpAdapter {
    async fn signup(&self, request: &SignupRequest) -> PortResult<AuthResponse> {
        let auth: AuthResponse = self
            .send_json(self.request(Method::POST, "/auth/signup").json(request))
            .await?;
        info!(username = %auth.user.username, "Signed up.");
        self.session().login(auth.clone());
        Ok(auth)
    }

    async fn login(&self, request: &LoginRequest) -> PortResult<AuthResponse> {
        let auth: AuthResponse = self
            .send_json(self.request(Method::POST, "/auth/login").json(request))
            .await?;
        info!(username = %auth.user.username, "Logged in.");
        self.session().login(auth.clone());
        Ok(auth)
    }
}
