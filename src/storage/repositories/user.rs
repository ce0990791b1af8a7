//! User repository — the credential store seam.
//!
//! The authentication core only ever reads through [`UserRepository`];
//! writes happen at startup (seeding) and in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::instrument;

use crate::auth::models::Role;
use crate::auth::user::{NewUser, User};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

#[derive(Debug, Clone, FromRow)]
struct UserRow {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub roles: String, // JSON array stored as string
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-mostly credential store interface.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Check whether a username is taken.
    async fn exists_by_username(&self, username: &str) -> Result<bool>;

    /// Create a new user account.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Delete a user account.
    async fn delete_user(&self, username: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct SqlxUserRepository {
    pool: DbPool,
}

impl SqlxUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn row_to_user(&self, row: UserRow) -> Result<User> {
        let roles: Vec<Role> = serde_json::from_str(&row.roles).map_err(|_| {
            Error::validation(format!("Unknown role in stored record for '{}'", row.username))
        })?;

        Ok(User {
            username: row.username,
            password_hash: row.password_hash,
            full_name: row.full_name,
            roles,
            enabled: row.enabled,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    #[instrument(skip(self), fields(username = %username), name = "db_find_user")]
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT username, password_hash, full_name, roles, enabled, created_at, updated_at \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch user".to_string(),
        })?;

        row.map(|r| self.row_to_user(r)).transpose()
    }

    #[instrument(skip(self), fields(username = %username), name = "db_user_exists")]
    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to check username".to_string(),
            })?;

        Ok(row.0 > 0)
    }

    #[instrument(skip(self, user), fields(username = %user.username), name = "db_create_user")]
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let roles = serde_json::to_string(&user.roles)?;
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, full_name, roles, enabled, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&roles)
        .bind(user.enabled)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to create user".to_string(),
        })?;

        self.find_by_username(&user.username)
            .await?
            .ok_or_else(|| Error::internal("User not found after creation"))
    }

    #[instrument(skip(self), fields(username = %username), name = "db_delete_user")]
    async fn delete_user(&self, username: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to delete user".to_string(),
            })?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("User", username));
        }

        Ok(())
    }
}
