//! JWT service for token generation and validation
//!
//! Tokens are HS256-signed with the process-wide secret and carry the
//! caller's id and role. They are stateless: nothing is persisted, and a
//! token stays valid until it expires.

use garden_common::models::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use uuid::Uuid;

use crate::{error::AuthError, identity::Identity};

/// Scheme literal expected in the Authorization header
const BEARER_SCHEME: &str = "Bearer";

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret used for signing and verifying tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 1 hour)
    pub token_expiry: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, token_expiry: u64) -> Self {
        Self {
            secret: secret.into(),
            token_expiry,
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// User role
    pub role: Role,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Generate a token for the given identity
    pub fn generate_token(&self, identity: &Identity) -> Result<String, AuthError> {
        self.generate_token_at(identity, now()?)
    }

    fn generate_token_at(&self, identity: &Identity, issued_at: u64) -> Result<String, AuthError> {
        let exp = issued_at
            .checked_add(self.config.token_expiry)
            .ok_or_else(|| {
                AuthError::TokenCreation(format!(
                    "token lifetime of {}s overflows the expiry timestamp",
                    self.config.token_expiry
                ))
            })?;

        let claims = Claims {
            sub: identity.id,
            role: identity.role,
            iat: issued_at,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Validate a token and return the identity it carries
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(Identity::new(token_data.claims.sub, token_data.claims.role))
    }

    /// Resolve the identity behind an Authorization header value
    pub fn authenticate(&self, header: Option<&str>) -> Result<Identity, AuthError> {
        let result = parse_bearer(header).and_then(|token| self.verify(token));
        if let Err(e) = &result {
            debug!("Authentication failed: {}", e);
        }
        result
    }
}

/// Extract the token from a `Bearer <token>` header value
///
/// The value must be exactly two space-separated parts, the first being the
/// literal scheme `Bearer`.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredentials)?;
    let parts: Vec<&str> = header.split(' ').collect();

    match parts.as_slice() {
        [BEARER_SCHEME, token] => Ok(*token),
        _ => Err(AuthError::MalformedCredentials),
    }
}

fn now() -> Result<u64, AuthError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| AuthError::TokenCreation(format!("Failed to get current time: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: u64 = 3600;

    fn service(secret: &str) -> JwtService {
        JwtService::new(JwtConfig::new(secret, TTL))
    }

    #[test]
    fn test_verify_recovers_signed_identity() {
        let jwt = service("garden-secret");
        for role in [Role::User, Role::Admin] {
            let identity = Identity::new(Uuid::new_v4(), role);
            let token = jwt.generate_token(&identity).unwrap();
            assert_eq!(jwt.verify(&token).unwrap(), identity);
        }
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt = service("garden-secret");
        let identity = Identity::new(Uuid::new_v4(), Role::User);
        let issued_at = now().unwrap() - 2 * TTL;
        let token = jwt.generate_token_at(&identity, issued_at).unwrap();

        let err = jwt.verify(&token).unwrap_err();
        assert!(err.is_unauthenticated());
    }

    #[test]
    fn test_token_just_inside_ttl_is_accepted() {
        let jwt = service("garden-secret");
        let identity = Identity::new(Uuid::new_v4(), Role::Admin);
        let issued_at = now().unwrap() - TTL + 60;
        let token = jwt.generate_token_at(&identity, issued_at).unwrap();

        assert_eq!(jwt.verify(&token).unwrap(), identity);
    }

    #[test]
    fn test_oversized_lifetime_fails_instead_of_overflowing() {
        let jwt = JwtService::new(JwtConfig::new("garden-secret", u64::MAX));
        let identity = Identity::new(Uuid::new_v4(), Role::User);

        assert!(matches!(
            jwt.generate_token(&identity),
            Err(AuthError::TokenCreation(_))
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let identity = Identity::new(Uuid::new_v4(), Role::Admin);
        let token = service("someone-else").generate_token(&identity).unwrap();
        assert!(service("garden-secret").verify(&token).is_err());
        assert!(service("garden-secret").verify("not.a.token").is_err());
    }

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer(Some("Bearer abc")).unwrap(), "abc");
        assert!(matches!(
            parse_bearer(None),
            Err(AuthError::MissingCredentials)
        ));
        for malformed in ["abc", "Basic abc", "bearer abc", "Bearer a b", "Bearer  abc"] {
            assert!(
                matches!(
                    parse_bearer(Some(malformed)),
                    Err(AuthError::MalformedCredentials)
                ),
                "{} should be malformed",
                malformed
            );
        }
    }

    #[test]
    fn test_authenticate_end_to_end() {
        let jwt = service("garden-secret");
        let identity = Identity::new(Uuid::new_v4(), Role::User);
        let header = format!("Bearer {}", jwt.generate_token(&identity).unwrap());

        assert_eq!(jwt.authenticate(Some(&header)).unwrap(), identity);
        assert!(jwt.authenticate(Some("Bearer garbage")).is_err());
        assert!(jwt.authenticate(None).is_err());
    }
}
