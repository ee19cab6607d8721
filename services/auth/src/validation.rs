//! Input validation utilities
//!
//! Each check reports the first problem it finds for one field; payload
//! validators call them in field order so the first offending field wins.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;

/// First offending field of a rejected payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type ValidationResult = Result<(), ValidationError>;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 128;
const EMAIL_MAX: usize = 254;

/// Validate username
pub fn validate_username(username: &str) -> ValidationResult {
    if username.is_empty() {
        return Err(ValidationError::new("\"username\" is required"));
    }

    let length = username.chars().count();
    if length < USERNAME_MIN {
        return Err(ValidationError::new(format!(
            "\"username\" must be at least {} characters long",
            USERNAME_MIN
        )));
    }

    if length > USERNAME_MAX {
        return Err(ValidationError::new(format!(
            "\"username\" must be at most {} characters long",
            USERNAME_MAX
        )));
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err(ValidationError::new(
            "\"username\" can only contain letters, numbers, and underscores",
        ));
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return Err(ValidationError::new("\"email\" is required"));
    }

    if email.len() > EMAIL_MAX {
        return Err(ValidationError::new(format!(
            "\"email\" must be at most {} characters long",
            EMAIL_MAX
        )));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(ValidationError::new("\"email\" must be a valid email"));
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return Err(ValidationError::new("\"password\" is required"));
    }

    let length = password.chars().count();
    if length < PASSWORD_MIN {
        return Err(ValidationError::new(format!(
            "\"password\" must be at least {} characters long",
            PASSWORD_MIN
        )));
    }

    if length > PASSWORD_MAX {
        return Err(ValidationError::new(format!(
            "\"password\" must be at most {} characters long",
            PASSWORD_MAX
        )));
    }

    Ok(())
}

/// Validate a free-text field against a minimum length
pub fn validate_min_length(field: &str, value: &str, min: usize) -> ValidationResult {
    if value.is_empty() {
        return Err(ValidationError::new(format!("\"{}\" is required", field)));
    }

    if value.chars().count() < min {
        return Err(ValidationError::new(format!(
            "\"{}\" must be at least {} characters long",
            field, min
        )));
    }

    Ok(())
}

/// Validate that a field holds an absolute URI
pub fn validate_uri(field: &str, value: &str) -> ValidationResult {
    if value.is_empty() {
        return Err(ValidationError::new(format!("\"{}\" is required", field)));
    }

    match Url::parse(value) {
        Ok(url) if !url.cannot_be_a_base() || url.scheme() == "data" => Ok(()),
        _ => Err(ValidationError::new(format!(
            "\"{}\" must be a valid uri",
            field
        ))),
    }
}

/// Validate that a coordinate is a finite number
pub fn validate_coordinate(field: &str, value: f64) -> ValidationResult {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new(format!("\"{}\" must be a number", field)))
    }
}
