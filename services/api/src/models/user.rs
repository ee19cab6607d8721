//! User update payloads

use chrono::Utc;
use garden_auth::Identity;
use garden_auth::validation::{self, ValidationError};
use garden_common::models::{Role, User};
use serde::Deserialize;
use std::str::FromStr;
use tracing::warn;

use super::{empty_update, normalize_email, trimmed};

/// Partial update of a user; only the fields present are applied
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Validated user changes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl UpdateUserRequest {
    /// Validate every present field before anything is applied
    pub fn validate(self) -> Result<UserChanges, ValidationError> {
        if self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
        {
            return Err(empty_update());
        }

        let username = self.username.map(trimmed);
        if let Some(username) = &username {
            validation::validate_username(username)?;
        }

        let email = self.email.map(normalize_email);
        if let Some(email) = &email {
            validation::validate_email(email)?;
        }

        if let Some(password) = &self.password {
            validation::validate_password(password)?;
        }

        let role = self
            .role
            .map(|role| {
                Role::from_str(role.trim())
                    .map_err(|_| ValidationError::new("\"role\" must be one of [user, admin]"))
            })
            .transpose()?;

        Ok(UserChanges {
            username,
            email,
            password: self.password,
            role,
        })
    }
}

impl UserChanges {
    /// Apply the changes on behalf of `actor`
    ///
    /// `password_hash` replaces the stored hash when given. A role change is
    /// only honoured when the acting identity is an admin.
    pub fn apply(self, user: &mut User, actor: &Identity, password_hash: Option<String>) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(hash) = password_hash {
            user.password_hash = hash;
        }
        match self.role {
            Some(role) if actor.is_admin() => user.role = role,
            Some(role) => warn!(
                "Ignoring role change to '{}' requested by non-admin {}",
                role, actor.id
            ),
            None => {}
        }
        user.updated_at = Utc::now();
    }
}
