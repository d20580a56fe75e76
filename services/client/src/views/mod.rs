pub mod notification_center;
pub mod post_view;
pub mod render;
pub mod state;
pub mod unread_poller;
pub mod vote_toggle;

pub use notification_center::NotificationCenter;
pub use post_view::PostView;
pub use state::AppState;
pub use unread_poller::UnreadPoller;
pub use vote_toggle::VoteToggle;
