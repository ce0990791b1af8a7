//! # Database Migration Management
//!
//! Schema evolution via SQL migrations embedded in the binary and executed
//! on application startup when `auto_migrate` is enabled. Each migration
//! runs at most once, tracked in a `schema_migrations` table.

use chrono::Utc;
use tracing::{debug, info};

use crate::errors::{Error, Result};
use crate::storage::DbPool;

/// Embedded migrations, applied in order.
const MIGRATIONS: &[(i64, &str, &str)] = &[
    (1, "create_users", include_str!("../../migrations/0001_create_users.sql")),
    (2, "create_services", include_str!("../../migrations/0002_create_services.sql")),
];

/// Run all pending migrations against the given pool.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            installed_on TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|err| Error::Database {
        source: err,
        context: "Failed to create schema_migrations table".to_string(),
    })?;

    for (version, description, sql) in MIGRATIONS {
        if migration_applied(pool, *version).await? {
            debug!(version, description, "migration already applied");
            continue;
        }

        for statement in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(pool).await.map_err(|err| Error::Database {
                source: err,
                context: format!("Failed to apply migration {} ({})", version, description),
            })?;
        }

        sqlx::query(
            "INSERT INTO schema_migrations (version, description, installed_on) VALUES ($1, $2, $3)",
        )
        .bind(*version)
        .bind(*description)
        .bind(Utc::now())
        .execute(pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: format!("Failed to record migration {}", version),
        })?;

        info!(version, description, "applied migration");
    }

    Ok(())
}

async fn migration_applied(pool: &DbPool, version: i64) -> Result<bool> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT version FROM schema_migrations WHERE version = $1")
            .bind(version)
            .fetch_optional(pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to query schema_migrations".to_string(),
            })?;
    Ok(row.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::storage::create_pool;

    async fn memory_pool() -> DbPool {
        let config = DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            ..DatabaseConfig::default()
        };
        create_pool(&config).await.unwrap()
    }

    #[tokio::test]
    async fn migrations_create_the_schema() {
        let pool = memory_pool().await;
        run_migrations(&pool).await.unwrap();

        for table in ["users", "application_services", "schema_migrations"] {
            let row: (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = $1",
            )
            .bind(table)
            .fetch_one(&pool)
            .await
            .unwrap();
            assert_eq!(row.0, 1, "missing table {}", table);
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = memory_pool().await;
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM schema_migrations").fetch_one(&pool).await.unwrap();
        assert_eq!(row.0, MIGRATIONS.len() as i64);
    }
}
