//! # Configuration Settings
//!
//! Defines the configuration structure for the ServicePulse backend.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Minimum accepted length for the token signing secret, in bytes.
const MIN_JWT_SECRET_LEN: usize = 32;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// HTTP server configuration
    #[validate(nested)]
    pub server: ServerConfig,

    /// Database configuration
    #[validate(nested)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[validate(nested)]
    pub auth: AuthConfig,

    /// Observability configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config = Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env()?,
            observability: ObservabilityConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;
        self.validate_custom()
    }

    /// Custom validation logic that goes beyond what the validator crate can do
    fn validate_custom(&self) -> Result<()> {
        if self.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(Error::config(format!(
                "JWT secret must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            )));
        }

        if !self.database.url.starts_with("sqlite:") {
            return Err(Error::config("Database URL must start with 'sqlite:'"));
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server bind address
    #[validate(length(min = 1, message = "Host cannot be empty"))]
    pub host: String,

    /// Server port
    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    pub port: u16,

    /// Enable permissive CORS for dashboard frontends
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080, enable_cors: true }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match std::env::var("SERVICEPULSE_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| Error::config(format!("Invalid SERVICEPULSE_PORT: {}", e)))?,
            Err(_) => defaults.port,
        };

        let host = std::env::var("SERVICEPULSE_HOST").unwrap_or(defaults.host);

        let enable_cors = match std::env::var("SERVICEPULSE_ENABLE_CORS") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| Error::config(format!("Invalid SERVICEPULSE_ENABLE_CORS: {}", e)))?,
            Err(_) => defaults.enable_cors,
        };

        Ok(Self { host, port, enable_cors })
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[validate(length(min = 1, message = "Database URL cannot be empty"))]
    pub url: String,

    /// Maximum number of connections in the pool
    #[validate(range(min = 1, max = 100, message = "Max connections must be between 1 and 100"))]
    pub max_connections: u32,

    /// Connection timeout in seconds
    #[validate(range(
        min = 1,
        max = 60,
        message = "Connect timeout must be between 1 and 60 seconds"
    ))]
    pub connect_timeout_seconds: u64,

    /// Enable automatic migrations on startup
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/servicepulse.db".to_string(),
            max_connections: 10,
            connect_timeout_seconds: 10,
            auto_migrate: true,
        }
    }
}

impl DatabaseConfig {
    /// Get connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Create DatabaseConfig from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: std::env::var("SERVICEPULSE_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.max_connections),
            connect_timeout_seconds: std::env::var("SERVICEPULSE_DB_CONNECT_TIMEOUT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.connect_timeout_seconds),
            auto_migrate: std::env::var("SERVICEPULSE_DB_AUTO_MIGRATE")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.auto_migrate),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthConfig {
    /// Symmetric signing secret for issued tokens. Process-wide
    /// configuration, never user input.
    #[validate(length(min = 1, message = "JWT secret cannot be empty"))]
    pub jwt_secret: String,

    /// Lifetime of issued tokens in seconds
    #[validate(range(min = 1, message = "Token TTL must be positive"))]
    pub token_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // Development-only default; real deployments must override.
            jwt_secret: "servicepulse-dev-secret-change-me-in-prod".to_string(),
            token_ttl_seconds: 86_400, // 24 hours
        }
    }
}

impl AuthConfig {
    /// Get token lifetime as Duration
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_seconds)
    }

    fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let token_ttl_seconds = match std::env::var("SERVICEPULSE_TOKEN_TTL_SECONDS") {
            Ok(raw) => raw.parse().map_err(|e| {
                Error::config(format!("Invalid SERVICEPULSE_TOKEN_TTL_SECONDS: {}", e))
            })?,
            Err(_) => defaults.token_ttl_seconds,
        };

        Ok(Self {
            jwt_secret: std::env::var("SERVICEPULSE_JWT_SECRET").unwrap_or(defaults.jwt_secret),
            token_ttl_seconds,
        })
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Service name reported in logs
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Default log level filter when RUST_LOG is not set
    pub log_level: String,

    /// Emit logs as JSON instead of human-readable text
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "servicepulse".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ObservabilityConfig {
    /// Create ObservabilityConfig from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service_name: std::env::var("SERVICEPULSE_SERVICE_NAME")
                .unwrap_or(defaults.service_name),
            log_level: std::env::var("SERVICEPULSE_LOG_LEVEL").unwrap_or(defaults.log_level),
            json_logs: std::env::var("SERVICEPULSE_JSON_LOGS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.json_logs),
        }
    }
}
