//! # Storage and Persistence
//!
//! Database connectivity and persistence layer for the ServicePulse
//! backend: the SQLite pool, embedded schema migrations, repository traits
//! with their `sqlx` implementations, and default-account seeding.

pub mod migrations;
pub mod pool;
pub mod repositories;
pub mod seed;

pub use migrations::run_migrations;
pub use pool::{create_pool, DbPool};
pub use seed::ensure_default_users;
