//! Core authentication data models: roles and the request-scoped principal.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Closed set of roles recognized by the dashboard.
///
/// Roles are a fixed enumeration rather than free-form strings so that an
/// unknown role name is rejected at the boundary (deserialization or
/// parsing) instead of silently failing every comparison downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access, including mutations of the service catalog.
    Admin,
    /// Read-only dashboard access.
    Lecteur,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Lecteur => "LECTEUR",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "LECTEUR" => Ok(Role::Lecteur),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// Error returned when role parsing fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// Request-scoped authentication context for a resolved principal.
///
/// Created by the authentication middleware and carried in the request's
/// extensions for the lifetime of that one request. The roles here always
/// come from the credential store's current user record, never from a
/// token's embedded claims.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub username: String,
    pub full_name: String,
    roles: Vec<Role>,
}

impl AuthContext {
    pub fn new(username: String, full_name: String, roles: Vec<Role>) -> Self {
        let mut deduped: Vec<Role> = Vec::with_capacity(roles.len());
        for role in roles {
            if !deduped.contains(&role) {
                deduped.push(role);
            }
        }
        Self { username, full_name, roles: deduped }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}
