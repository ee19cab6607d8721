//! Authentication error types

use thiserror::Error;

/// Failures while establishing who the caller is
#[derive(Error, Debug)]
pub enum AuthError {
    /// No Authorization header was sent
    #[error("Missing authorization header")]
    MissingCredentials,

    /// The header is not `Bearer <token>`
    #[error("Malformed authorization header")]
    MalformedCredentials,

    /// Bad signature, expired, or undecodable token
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// A token could not be issued
    #[error("Failed to create token: {0}")]
    TokenCreation(String),

    /// The secret hasher failed
    #[error("Hashing error: {0}")]
    Hashing(String),
}

impl AuthError {
    /// Whether the failure is the caller's credential rather than the server
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredentials
                | AuthError::MalformedCredentials
                | AuthError::InvalidToken(_)
        )
    }
}
