//! services/client/src/adapters/http.rs
//!
//! The REST transport shared by every resource adapter. Builds requests
//! against the configured base URL, attaches the session token, and maps HTTP
//! failures onto `PortError`.

use std::sync::Arc;
use std::time::Duration;

use forum_client_core::ports::{PortError, PortResult};
use forum_client_core::session::SessionContext;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements every resource port over the forum's REST API.
#[derive(Clone, Debug)]
pub struct HttpAdapter {
    client: Client,
    base_url: String,
    session: Arc<SessionContext>,
}

/// Error body returned by the server, e.g. `{"error": "post not found"}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpAdapter {
    /// Creates a new `HttpAdapter`.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<SessionContext>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Starts a request; the bearer token is attached when a session is active.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "Sending request.");
        let builder = self.client.request(method, url.as_str());
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and decodes a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> PortResult<T> {
        let response = dispatch(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Unexpected(format!("Malformed response body: {}", e)))
    }

    /// Sends the request and ignores any body.
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> PortResult<()> {
        dispatch(builder).await.map(|_| ())
    }
}

async fn dispatch(builder: RequestBuilder) -> PortResult<Response> {
    let response = builder
        .send()
        .await
        .map_err(|e| PortError::Unexpected(format!("Request failed: {}", e)))?;
    check_status(response).await
}

/// Maps non-success statuses: 404 to `NotFound`, 401/403 to `Unauthorized`,
/// everything else to `Unexpected`.
async fn check_status(response: Response) -> PortResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    warn!(%status, %url, %message, "Request rejected.");

    Err(match status {
        StatusCode::NOT_FOUND => PortError::NotFound(if message.is_empty() {
            url
        } else {
            message
        }),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized,
        _ => PortError::Unexpected(format!("{}: {}", status, message)),
    })
}
