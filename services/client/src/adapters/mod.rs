pub mod auth;
pub mod comments;
pub mod http;
pub mod notifications;
pub mod posts;
pub mod topics;
pub mod users;
pub mod votes;

pub use http::HttpAdapter;
