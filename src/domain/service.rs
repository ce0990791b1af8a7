//! Application service domain models.
//!
//! An [`ApplicationService`] is one monitored entry on the dashboard: a named
//! service with a health status and optional maintenance messaging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Health status of a monitored service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    /// Operating normally
    Operational,
    /// Up, but with reduced performance
    Degraded,
    /// Planned maintenance in progress
    Maintenance,
    /// Down
    Outage,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Operational => "OPERATIONAL",
            ServiceStatus::Degraded => "DEGRADED",
            ServiceStatus::Maintenance => "MAINTENANCE",
            ServiceStatus::Outage => "OUTAGE",
        }
    }
}

impl Display for ServiceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = ServiceStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPERATIONAL" => Ok(ServiceStatus::Operational),
            "DEGRADED" => Ok(ServiceStatus::Degraded),
            "MAINTENANCE" => Ok(ServiceStatus::Maintenance),
            "OUTAGE" => Ok(ServiceStatus::Outage),
            other => Err(ServiceStatusParseError(other.to_string())),
        }
    }
}

/// Error returned when service status parsing fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid service status: {0}")]
pub struct ServiceStatusParseError(pub String);

/// Stored representation of a monitored application service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationService {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: ServiceStatus,
    pub maintenance_message: Option<String>,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ApplicationService {
    /// Whether this service should appear on the alerts list.
    pub fn is_alerting(&self) -> bool {
        self.status != ServiceStatus::Operational
    }
}

/// New service database payload.
#[derive(Debug, Clone)]
pub struct NewApplicationService {
    pub name: String,
    pub description: Option<String>,
    pub status: ServiceStatus,
    pub maintenance_message: Option<String>,
}

/// Full-update payload for an existing service.
#[derive(Debug, Clone)]
pub struct UpdateApplicationService {
    pub name: String,
    pub description: Option<String>,
    pub status: ServiceStatus,
    pub maintenance_message: Option<String>,
}
