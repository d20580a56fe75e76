//! services/client/src/views/vote_toggle.rs
//!
//! Drives the vote state machine across the network round-trip.

use crate::error::ClientError;
use forum_client_core::domain::{Post, VoteDirection};
use forum_client_core::ports::VoteService;
use forum_client_core::vote::{VoteRequest, VoteState};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The vote buttons of one post.
///
/// The state lock is only held to start and to settle a press, never while
/// the request is on the wire, so a second press during that time sees the
/// request in flight and is dropped.
pub struct VoteToggle {
    votes: Arc<dyn VoteService>,
    state: Mutex<VoteState>,
}

impl VoteToggle {
    pub fn new(votes: Arc<dyn VoteService>, state: VoteState) -> Self {
        Self {
            votes,
            state: Mutex::new(state),
        }
    }

    pub fn for_post(votes: Arc<dyn VoteService>, post: &Post) -> Self {
        Self::new(votes, VoteState::from_post(post))
    }

    pub async fn snapshot(&self) -> VoteState {
        *self.state.lock().await
    }

    /// Handles a button press.
    ///
    /// Returns the settled state, or `Ok(None)` if the press was ignored
    /// because another one is still in flight. On failure nothing changes
    /// and the error is transient.
    pub async fn cast(&self, direction: VoteDirection) -> Result<Option<VoteState>, ClientError> {
        let (post_id, request) = {
            let mut state = self.state.lock().await;
            match state.begin(direction) {
                Some(request) => (state.post_id(), request),
                None => {
                    debug!(post_id = state.post_id(), "Vote already in flight, ignoring press.");
                    return Ok(None);
                }
            }
        };

        let result = match request {
            VoteRequest::Vote(direction) => self.votes.vote(post_id, direction).await,
            VoteRequest::Unvote => self.votes.unvote(post_id).await,
        };

        let mut state = self.state.lock().await;
        match result {
            Ok(outcome) => {
                state.complete(outcome);
                info!(
                    post_id,
                    vote_count = state.vote_count(),
                    user_vote = i8::from(state.user_vote()),
                    "Vote settled."
                );
                Ok(Some(*state))
            }
            Err(e) => {
                state.abort();
                warn!(post_id, error = %e, "Vote failed, keeping previous state.");
                Err(e.into())
            }
        }
    }

    /// Adopts the counts of a refetched post unless a press is in flight.
    pub async fn sync_from(&self, post: &Post) -> bool {
        self.state.lock().await.sync_from(post)
    }
}
