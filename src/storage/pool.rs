//! # Database Connection Pool Management
//!
//! Provides database connection pool creation for the SQLite backing store.

use crate::config::DatabaseConfig;
use crate::errors::{Error, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::{str::FromStr, time::Duration};

/// Type alias for the database connection pool
pub type DbPool = Pool<Sqlite>;

const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a database connection pool with the specified configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let connect_options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| Error::Database {
            source: e,
            context: format!("Invalid SQLite connection string: {}", sanitize_url(&config.url)),
        })?
        .create_if_missing(true)
        .busy_timeout(SQLITE_BUSY_TIMEOUT)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout())
        .connect_with(connect_options)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                url = %sanitize_url(&config.url),
                "Failed to create SQLite database pool"
            );
            Error::Database {
                source: e,
                context: format!("Failed to connect to database: {}", sanitize_url(&config.url)),
            }
        })?;

    tracing::info!(
        url = %sanitize_url(&config.url),
        max_connections = config.max_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Strip query parameters before a URL lands in logs or error messages.
fn sanitize_url(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
