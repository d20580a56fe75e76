pub mod comment_tree;
pub mod domain;
pub mod notifications;
pub mod ports;
pub mod session;
pub mod validation;
pub mod vote;

#[cfg(test)]
mod fixtures;

pub use comment_tree::{CommentNode, CommentTree, MAX_REPLY_DEPTH};
pub use domain::{
    AuthResponse, Comment, LoginRequest, NewComment, NewPost, NewTopic, Notification,
    NotificationKind, Page, Post, PostUpdate, ProfileUpdate, SignupRequest, Topic, User,
    UserVote, VoteDirection, VoteOutcome,
};
pub use notifications::NotificationReconciler;
pub use ports::{
    AuthService, CommentService, NotificationService, PortError, PortResult, PostService,
    TopicService, UserService, VoteService,
};
pub use session::{Owned, Session, SessionContext};
pub use validation::ValidationError;
pub use vote::{VoteRequest, VoteState};
