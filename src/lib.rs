//! # ServicePulse
//!
//! ServicePulse is a small dashboard backend that tracks the health status
//! of application services and exposes role-gated CRUD endpoints for
//! managing them.
//!
//! ## Architecture
//!
//! The system follows a layered architecture pattern:
//!
//! ```text
//! REST API Layer → Repositories → SQLite
//!      ↓
//! Authentication Stack (token service, filter, policy)
//! ```
//!
//! ## Core Components
//!
//! - **REST API**: Axum-based HTTP server for the service catalog and auth
//!   endpoints
//! - **Authentication Stack**: stateless JWT issuance/validation, a
//!   once-per-request authentication filter, and an ordered
//!   route-classification policy
//! - **Persistence Layer**: SQLx with SQLite for users and services
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use servicepulse::{api, config::AppConfig, storage, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let pool = storage::create_pool(&config.database).await?;
//!     storage::run_migrations(&pool).await?;
//!     let router = api::build_router(pool, &config)?;
//!     api::start_api_server(&config.server, router).await
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod storage;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
