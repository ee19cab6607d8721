//! Custom error types for the API service

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use garden_auth::{AuthError, DenyReason, validation::ValidationError};
use garden_common::error::DatabaseError;
use serde_json::json;
use std::fmt;
use thiserror::Error;
use tracing::error;

/// Kind of record a lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Plant,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::User => f.write_str("User"),
            Resource::Plant => f.write_str("Plant"),
        }
    }
}

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, malformed, invalid or expired credential
    #[error("Authorization denied")]
    Unauthenticated,

    /// Role or ownership check failed
    #[error("Access denied")]
    Forbidden,

    /// The requested record does not exist
    #[error("{0} not found")]
    NotFound(Resource),

    /// Input failed validation; carries the first offending field
    #[error("{0}")]
    Validation(String),

    /// Username or email already taken
    #[error("Username or email already exists")]
    Conflict,

    /// Login with unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Store failure
    #[error("Store error: {0}")]
    Store(#[source] DatabaseError),

    /// Any other server-side failure
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Diagnostic detail attached to 500 responses
///
/// The detail rides along as a response extension and is only written into
/// the body outside production, see [`crate::middleware::error_detail_middleware`].
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    pub detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::Conflict | ApiError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to any client
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Unauthenticated => "Authorization denied.".to_string(),
            ApiError::Forbidden => "Access denied.".to_string(),
            ApiError::NotFound(resource) => format!("{} not found.", resource),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Conflict => "Username or email already exists.".to_string(),
            ApiError::InvalidCredentials => "Invalid credentials.".to_string(),
            ApiError::Store(_) | ApiError::Internal(_) => "Server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.public_message();

        let body = Json(json!({
            "message": message,
        }));

        let mut response = (status, body).into_response();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
            response.extensions_mut().insert(ErrorDetail {
                message,
                detail: self.to_string(),
            });
        }

        response
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Conflict(_) => ApiError::Conflict,
            DatabaseError::MissingReference(_) => ApiError::NotFound(Resource::User),
            other => ApiError::Store(other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_unauthenticated() {
            ApiError::Unauthenticated
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<DenyReason> for ApiError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::Unauthenticated => ApiError::Unauthenticated,
            DenyReason::Role | DenyReason::Ownership => ApiError::Forbidden,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.0)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                ApiError::Validation(describe_serde_error(strip_rejection_prefix(&text)))
            }
            _ => ApiError::Validation(text),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let text = rejection.body_text();
        match rejection {
            QueryRejection::FailedToDeserializeQueryString(_) => {
                ApiError::Validation(describe_serde_error(strip_rejection_prefix(&text)))
            }
            _ => ApiError::Validation(text),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Validation(describe_serde_error(&err.to_string()))
    }
}

/// Drop axum's leading "Failed to ...: " sentence from a rejection body
fn strip_rejection_prefix(text: &str) -> &str {
    text.split_once(": ").map_or(text, |(_, rest)| rest)
}

/// Reword a serde message in the `"field" ...` style of the validators
///
/// Messages carrying a field path (`status: unknown variant ...`) are
/// rewritten around the field; unknown fields read `"x" is not allowed`.
fn describe_serde_error(message: &str) -> String {
    if let Some(rest) = message.strip_prefix("unknown field `") {
        if let Some((field, _)) = rest.split_once('`') {
            return format!("\"{}\" is not allowed", field);
        }
    }

    match message.split_once(": ") {
        Some((path, rest)) if is_field_path(path) => {
            match rest.strip_prefix("unknown field `") {
                Some(_) => describe_serde_error(rest),
                None => format!("\"{}\" {}", path, rest),
            }
        }
        _ => message.to_string(),
    }
}

fn is_field_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
