//! # Configuration Management
//!
//! Environment-driven configuration for the ServicePulse backend. All
//! settings have sensible development defaults; production deployments
//! override them with `SERVICEPULSE_*` environment variables.

mod settings;

pub use settings::{AppConfig, AuthConfig, DatabaseConfig, ObservabilityConfig, ServerConfig};
