//! crates/forum_client_core/src/validation.rs
//!
//! Client-side input checks. Every builder here runs before a request is
//! dispatched, so invalid input never reaches the server. Lengths are counted
//! in characters after trimming surrounding whitespace.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    LoginRequest, NewComment, NewPost, NewTopic, PostUpdate, ProfileUpdate, SignupRequest,
};

pub const COMMENT_MAX_LEN: usize = 5000;
pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 200;
pub const TOPIC_DESCRIPTION_MAX_LEN: usize = 1000;
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 100;
pub const BIO_MAX_LEN: usize = 500;

/// `local@domain.tld`, no whitespace and a single `@`.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} must be less than {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("please enter a valid email")]
    InvalidEmail,
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed)
}

fn bounded(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if len > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

fn title(value: &str) -> Result<String, ValidationError> {
    let title = required("title", value)?;
    bounded("title", title, TITLE_MIN_LEN, TITLE_MAX_LEN)?;
    Ok(title.to_string())
}

fn email(value: &str) -> Result<String, ValidationError> {
    let email = required("email", value)?;
    if !EMAIL.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email.to_lowercase())
}

/// Checks comment text and returns it trimmed.
pub fn comment_content(content: &str) -> Result<String, ValidationError> {
    let content = required("comment", content)?;
    bounded("comment", content, 1, COMMENT_MAX_LEN)?;
    Ok(content.to_string())
}

pub fn new_comment(
    post_id: i64,
    content: &str,
    parent_id: Option<i64>,
) -> Result<NewComment, ValidationError> {
    Ok(NewComment {
        post_id,
        content: comment_content(content)?,
        parent_id,
    })
}

pub fn new_post(topic_id: i64, title_text: &str, content: &str) -> Result<NewPost, ValidationError> {
    let update = post_update(title_text, content)?;
    Ok(NewPost {
        topic_id,
        title: update.title,
        content: update.content,
    })
}

pub fn post_update(title_text: &str, content: &str) -> Result<PostUpdate, ValidationError> {
    Ok(PostUpdate {
        title: title(title_text)?,
        content: required("content", content)?.to_string(),
    })
}

pub fn new_topic(title_text: &str, description: &str) -> Result<NewTopic, ValidationError> {
    let title = title(title_text)?;
    let description = description.trim();
    bounded("description", description, 0, TOPIC_DESCRIPTION_MAX_LEN)?;
    Ok(NewTopic {
        title,
        description: description.to_string(),
    })
}

pub fn signup(username: &str, email_text: &str, password: &str) -> Result<SignupRequest, ValidationError> {
    let username = required("username", username)?;
    bounded("username", username, USERNAME_MIN_LEN, USERNAME_MAX_LEN)?;
    let email = email(email_text)?;
    if password.is_empty() {
        return Err(ValidationError::Required("password"));
    }
    bounded("password", password, PASSWORD_MIN_LEN, PASSWORD_MAX_LEN)?;
    Ok(SignupRequest {
        username: username.to_string(),
        email,
        password: password.to_string(),
    })
}

pub fn login(email_text: &str, password: &str) -> Result<LoginRequest, ValidationError> {
    let email = email(email_text)?;
    if password.is_empty() {
        return Err(ValidationError::Required("password"));
    }
    Ok(LoginRequest {
        email,
        password: password.to_string(),
    })
}

pub fn profile_update(
    bio: Option<&str>,
    avatar_url: Option<&str>,
) -> Result<ProfileUpdate, ValidationError> {
    let bio = bio.map(str::trim);
    if let Some(bio) = bio {
        bounded("bio", bio, 0, BIO_MAX_LEN)?;
    }
    Ok(ProfileUpdate {
        bio: bio.map(str::to_string),
        avatar_url: avatar_url.map(|u| u.trim().to_string()),
    })
}
