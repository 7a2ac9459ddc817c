use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, Result};

/// Input validation utilities for the hobbyhub service
///
/// Content-length limits live here and nowhere else: 300 characters is the
/// authoritative post cap, enforced server-side for every write path.

/// Post descriptions must be 10-300 characters.
pub const POST_DESC_MIN: usize = 10;
pub const POST_DESC_MAX: usize = 300;

/// Comment text must be 1-250 characters.
pub const COMMENT_TEXT_MIN: usize = 1;
pub const COMMENT_TEXT_MAX: usize = 250;

/// Minimum password length on registration and password change.
pub const PASSWORD_MIN: usize = 5;

// Compile regex patterns once at startup.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // This regex is hardcoded and validated - it is a compile-time constant in practice
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    // This regex is hardcoded and validated - it is a compile-time constant in practice
    Regex::new(r"^[a-zA-Z0-9_-]{3,32}$")
        .expect("hardcoded username regex is invalid - fix source code")
});

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> Result<()> {
    if !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(AppError::Validation("Must use a valid email address".to_string()))
    }
}

/// Validate username format (3-32 characters, alphanumeric with - and _)
pub fn validate_username(username: &str) -> Result<()> {
    if USERNAME_REGEX.is_match(username) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Username must be 3-32 characters (letters, digits, - and _)".to_string(),
        ))
    }
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() >= PASSWORD_MIN {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN
        )))
    }
}

pub fn validate_post_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Give your post a title!".to_string()));
    }
    Ok(())
}

pub fn validate_post_desc(desc: &str) -> Result<()> {
    let len = desc.chars().count();
    if len < POST_DESC_MIN || len > POST_DESC_MAX {
        return Err(AppError::Validation(format!(
            "Post description must be between {} and {} characters",
            POST_DESC_MIN, POST_DESC_MAX
        )));
    }
    Ok(())
}

pub fn validate_comment_text(text: &str) -> Result<()> {
    let len = text.chars().count();
    if len < COMMENT_TEXT_MIN || len > COMMENT_TEXT_MAX {
        return Err(AppError::Validation(format!(
            "Comments must be between {} and {} characters",
            COMMENT_TEXT_MIN, COMMENT_TEXT_MAX
        )));
    }
    Ok(())
}
