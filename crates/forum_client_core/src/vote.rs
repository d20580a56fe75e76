//! crates/forum_client_core/src/vote.rs
//!
//! The per-post vote toggle, as a state machine with no I/O.
//!
//! A press is turned into a request by [`VoteState::begin`]; the caller sends
//! it and reports back with [`VoteState::complete`] or [`VoteState::abort`].
//! Local state only ever changes to what the server answered: nothing is
//! incremented or decremented here.

use crate::domain::{Post, UserVote, VoteDirection, VoteOutcome};

/// The request a button press translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteRequest {
    Vote(VoteDirection),
    Unvote,
}

impl VoteRequest {
    /// Pressing the button matching the current vote withdraws it;
    /// any other press votes in that direction.
    pub fn for_press(current: UserVote, direction: VoteDirection) -> Self {
        if current == UserVote::from(direction) {
            VoteRequest::Unvote
        } else {
            VoteRequest::Vote(direction)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteState {
    post_id: i64,
    vote_count: i64,
    user_vote: UserVote,
    pending: Option<VoteRequest>,
}

impl VoteState {
    pub fn new(post_id: i64, vote_count: i64, user_vote: UserVote) -> Self {
        Self {
            post_id,
            vote_count,
            user_vote,
            pending: None,
        }
    }

    pub fn from_post(post: &Post) -> Self {
        Self::new(post.id, post.vote_count, post.user_vote)
    }

    pub fn post_id(&self) -> i64 {
        self.post_id
    }

    pub fn vote_count(&self) -> i64 {
        self.vote_count
    }

    pub fn user_vote(&self) -> UserVote {
        self.user_vote
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a press. Returns `None` while another request is outstanding;
    /// that press is dropped, not queued.
    pub fn begin(&mut self, direction: VoteDirection) -> Option<VoteRequest> {
        if self.pending.is_some() {
            return None;
        }
        let request = VoteRequest::for_press(self.user_vote, direction);
        self.pending = Some(request);
        Some(request)
    }

    /// Applies the server's answer to the outstanding request.
    ///
    /// A withdrawn vote always lands on `UserVote::None`. Returns `false` and
    /// changes nothing if no request was outstanding.
    pub fn complete(&mut self, outcome: VoteOutcome) -> bool {
        let Some(request) = self.pending.take() else {
            return false;
        };
        self.vote_count = outcome.vote_count;
        self.user_vote = match request {
            VoteRequest::Unvote => UserVote::None,
            VoteRequest::Vote(_) => outcome.user_vote,
        };
        true
    }

    /// The outstanding request failed: the previous state stands.
    pub fn abort(&mut self) {
        self.pending = None;
    }

    /// Takes the values of a refetched post, unless a request is outstanding.
    pub fn sync_from(&mut self, post: &Post) -> bool {
        if self.pending.is_some() || post.id != self.post_id {
            return false;
        }
        self.vote_count = post.vote_count;
        self.user_vote = post.user_vote;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn outcome(vote_count: i64, user_vote: UserVote) -> VoteOutcome {
        VoteOutcome {
            vote_count,
            user_vote,
        }
    }

    #[rstest]
    #[case(UserVote::None, VoteDirection::Up, VoteRequest::Vote(VoteDirection::Up))]
    #[case(UserVote::None, VoteDirection::Down, VoteRequest::Vote(VoteDirection::Down))]
    #[case(UserVote::Up, VoteDirection::Up, VoteRequest::Unvote)]
    #[case(UserVote::Down, VoteDirection::Down, VoteRequest::Unvote)]
    #[case(UserVote::Up, VoteDirection::Down, VoteRequest::Vote(VoteDirection::Down))]
    #[case(UserVote::Down, VoteDirection::Up, VoteRequest::Vote(VoteDirection::Up))]
    fn transition_table(
        #[case] current: UserVote,
        #[case] press: VoteDirection,
        #[case] expected: VoteRequest,
    ) {
        let mut state = VoteState::new(1, 0, current);
        assert_eq!(state.begin(press), Some(expected));
    }

    #[test]
    fn upvote_then_upvote_again_withdraws() {
        let mut state = VoteState::new(1, 5, UserVote::None);

        assert_eq!(state.begin(VoteDirection::Up), Some(VoteRequest::Vote(VoteDirection::Up)));
        assert!(state.complete(outcome(6, UserVote::Up)));
        assert_eq!((state.vote_count(), state.user_vote()), (6, UserVote::Up));

        assert_eq!(state.begin(VoteDirection::Up), Some(VoteRequest::Unvote));
        assert!(state.complete(outcome(5, UserVote::None)));
        assert_eq!((state.vote_count(), state.user_vote()), (5, UserVote::None));
    }

    #[test]
    fn press_while_in_flight_is_ignored() {
        let mut state = VoteState::new(1, 5, UserVote::None);
        state.begin(VoteDirection::Up);

        assert!(state.is_in_flight());
        assert_eq!(state.begin(VoteDirection::Down), None);
        assert_eq!(state.begin(VoteDirection::Up), None);
        assert_eq!((state.vote_count(), state.user_vote()), (5, UserVote::None));
    }

    #[test]
    fn count_comes_from_the_server_not_arithmetic() {
        let mut state = VoteState::new(1, 5, UserVote::None);
        state.begin(VoteDirection::Up);
        // Others voted meanwhile.
        state.complete(outcome(11, UserVote::Up));
        assert_eq!(state.vote_count(), 11);
    }

    #[test]
    fn unvote_lands_on_no_vote() {
        let mut state = VoteState::new(1, 3, UserVote::Down);
        assert_eq!(state.begin(VoteDirection::Down), Some(VoteRequest::Unvote));
        state.complete(outcome(4, UserVote::Down));
        assert_eq!(state.user_vote(), UserVote::None);
        assert_eq!(state.vote_count(), 4);
    }

    #[test]
    fn abort_leaves_state_untouched_and_unlocks() {
        let mut state = VoteState::new(1, 5, UserVote::Up);
        state.begin(VoteDirection::Down);
        state.abort();

        assert!(!state.is_in_flight());
        assert_eq!((state.vote_count(), state.user_vote()), (5, UserVote::Up));
        assert!(state.begin(VoteDirection::Down).is_some());
    }

    #[test]
    fn completion_without_request_is_ignored() {
        let mut state = VoteState::new(1, 5, UserVote::None);
        assert!(!state.complete(outcome(100, UserVote::Up)));
        assert_eq!(state.vote_count(), 5);
    }

    #[test]
    fn refetch_does_not_override_pending_vote() {
        let mut post_state = VoteState::new(1, 5, UserVote::None);
        let mut post = crate::fixtures::post(1);
        post.vote_count = 9;
        post.user_vote = UserVote::Down;

        post_state.begin(VoteDirection::Up);
        assert!(!post_state.sync_from(&post));
        post_state.abort();
        assert!(post_state.sync_from(&post));
        assert_eq!((post_state.vote_count(), post_state.user_vote()), (9, UserVote::Down));
    }
}
