//! Authentication and authorization for the Virtual Garden API
//!
//! This crate holds everything that decides who the caller is and what the
//! caller may touch:
//!
//! - [`jwt`]: signing and verifying bearer tokens
//! - [`password`]: hashing and verifying account secrets
//! - [`guard`]: the ownership and role guards and the pipeline composing them
//! - [`validation`]: field-level input checks shared by the request payloads

pub mod error;
pub mod guard;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod validation;

pub use error::AuthError;
pub use guard::{Decision, DenyReason, Pipeline, RequestContext};
pub use identity::Identity;
pub use jwt::{JwtConfig, JwtService};
pub use password::SecretHasher;
