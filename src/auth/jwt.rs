//! JWT utilities for ServicePulse authentication.
//!
//! Tokens are self-contained, HS256-signed, and validated without any
//! storage round-trip: a forged or expired token is rejected on signature
//! and timestamp alone.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::models::Role;
use crate::config::AuthConfig;
use crate::errors::{Error, Result};

/// Minimum signing secret length, matching the startup configuration check.
const MIN_SECRET_LEN: usize = 32;

/// JWT claims structure.
///
/// `roles` and `fullName` are wire-compatibility requirements: any verifier
/// holding the shared secret must find them under exactly these names.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (unix seconds)
    pub exp: usize,
    /// Issued-at time (unix seconds)
    pub iat: usize,
    /// Roles granted at issuance. Advisory only: authorization always
    /// re-reads the credential store, so a stale claim cannot escalate.
    pub roles: Vec<Role>,
    /// Display name of the subject
    #[serde(rename = "fullName")]
    pub full_name: String,
}

/// Validation outcome for a rejected token.
///
/// The distinction is internal (logging); callers outside the auth module
/// see both as plain "unauthenticated".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed, truncated, or signature mismatch. Deliberately a single
    /// bucket: a forger learns nothing from the failure mode.
    #[error("token invalid")]
    Invalid,
    #[error("token expired")]
    Expired,
}

/// Service for issuing and validating signed tokens.
///
/// Holds only immutable key material, so it is freely shared across
/// concurrent requests.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("encoding_key", &"<redacted>")
            .field("decoding_key", &"<redacted>")
            .field("validation", &self.validation)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenService {
    /// Create a token service from the application's auth configuration.
    ///
    /// Fails with a configuration error when no usable signing secret is
    /// configured; this is checked at startup, never per request.
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        if config.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(Error::config(format!(
                "Token signing secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: a token is valid only while now <= exp.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl_seconds: config.token_ttl_seconds,
        })
    }

    /// Issue a signed token for the given subject with the configured
    /// lifetime.
    pub fn issue(&self, username: &str, roles: &[Role], full_name: &str) -> Result<String> {
        let now = Utc::now().timestamp() as usize;

        let claims = Claims {
            sub: username.to_string(),
            exp: now + self.ttl_seconds as usize,
            iat: now,
            roles: roles.to_vec(),
            full_name: full_name.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| Error::internal(format!("Failed to sign token: {}", err)))
    }

    /// Validate a token and return its claims.
    ///
    /// Signature integrity is checked before anything else; any structural
    /// malformation is indistinguishable from a signature failure.
    pub fn validate(&self, token: &str) -> std::result::Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }

    /// Validate a token and additionally require that its subject matches
    /// `expected_subject`, so a token cannot be replayed for a different
    /// username than the caller resolved.
    pub fn is_valid_for(&self, token: &str, expected_subject: &str) -> bool {
        self.validate(token).map(|claims| claims.sub == expected_subject).unwrap_or(false)
    }
}
