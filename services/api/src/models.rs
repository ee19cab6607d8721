//! API models for request and response payloads

use garden_auth::validation::{self, ValidationError};
use serde::{Deserialize, Deserializer, Serialize};

pub mod plant;
pub mod user;

/// Request for user registration
///
/// Any `role` the client sends is ignored: self-registration always yields a
/// plain user.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration input after normalization and validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<NewAccount, ValidationError> {
        let username = trimmed(self.username);
        let email = normalize_email(self.email);

        validation::validate_username(&username)?;
        validation::validate_email(&email)?;
        validation::validate_password(&self.password)?;

        Ok(NewAccount {
            username,
            email,
            password: self.password,
        })
    }
}

/// Request for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Normalized email and password
    pub fn validate(self) -> Result<(String, String), ValidationError> {
        let email = normalize_email(self.email);
        validation::validate_email(&email)?;

        if self.password.is_empty() {
            return Err(ValidationError::new("\"password\" is required"));
        }

        Ok((email, self.password))
    }
}

/// Response carrying a freshly signed token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub(crate) fn trimmed(value: String) -> String {
    value.trim().to_string()
}

pub(crate) fn normalize_email(value: String) -> String {
    value.trim().to_lowercase()
}

/// Deserialize a field that was present in the payload, keeping an explicit
/// `null` apart from an absent field (which falls back to `Default`).
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub(crate) fn empty_update() -> ValidationError {
    ValidationError::new("\"value\" must have at least 1 key")
}
