//! User account domain models.
//!
//! User records are owned by the credential store; the authentication core
//! only ever reads them. The `username` is the unique, immutable key.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::models::Role;

/// Stored representation of a user account.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    /// Opaque one-way hash; never serialized to clients.
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,
    pub full_name: String,
    pub roles: Vec<Role>,
    /// Disabled accounts must never authenticate, even with correct
    /// credentials or a still-valid token.
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user database payload.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub roles: Vec<Role>,
    pub enabled: bool,
}
