//! services/client/src/adapters/votes.rs
//!
//! Implements the `VoteService` port over `/posts/{id}/vote`.

use async_trait::async_trait;
use forum_client_core::domain::{VoteDirection, VoteOutcome};
use forum_client_core::ports::{PortResult, VoteService};
use reqwest::Method;
use serde::Serialize;

use super::http::HttpAdapter;

#[derive(Serialize)]
struct VoteBody {
    vote_type: i8,
}

#[async_trait]
impl VoteService for HttpAdapter {
    async fn vote(&self, post_id: i64, direction: VoteDirection) -> PortResult<VoteOutcome> {
        let body = VoteBody {
            vote_type: direction.value(),
        };
        self.send_json(
            self.request(Method::POST, &format!("/posts/{}/vote", post_id))
                .json(&body),
        )
        .await
    }

    async fn unvote(&self, post_id: i64) -> PortResult<VoteOutcome> {
        self.send_json(self.request(Method::DELETE, &format!("/posts/{}/vote", post_id)))
            .await
    }
}
