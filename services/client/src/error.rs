//! services/client/src/error.rs
//!
//! Defines the primary error type for the client service.

use crate::config::ConfigError;
use forum_client_core::ports::PortError;
use forum_client_core::validation::ValidationError;

/// The primary error type for the `client` service.
///
/// Every failure is scoped to the operation that raised it; none of these is
/// meant to bring the process down.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Input rejected before any request was sent.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Represents an error building the HTTP client.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The current user may not change this resource.
    #[error("Only the creator can modify {0}")]
    NotOwner(String),

    /// Replies are not offered this deep in the thread.
    #[error("Comment {0} is too deeply nested to reply to")]
    ReplyTooDeep(i64),

    /// Represents a standard Input/Output error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Network and server failures. Show a notice; the user may retry.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Port(e) => e.is_transient(),
            ClientError::Http(_) => true,
            _ => false,
        }
    }

    /// The viewed resource is gone; the view should fall back to a safe default.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Port(e) if e.is_not_found())
    }
}
