//! Application service repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use tracing::instrument;

use crate::domain::{
    ApplicationService, NewApplicationService, ServiceStatus, UpdateApplicationService,
};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

const SELECT_COLUMNS: &str =
    "id, name, description, status, maintenance_message, last_updated, created_at";

#[derive(Debug, Clone, FromRow)]
struct ServiceRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub maintenance_message: Option<String>,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ServiceRow {
    fn into_service(self) -> Result<ApplicationService> {
        let status = ServiceStatus::from_str(&self.status).map_err(|_| {
            Error::validation(format!("Unknown service status '{}'", self.status))
        })?;

        Ok(ApplicationService {
            id: self.id,
            name: self.name,
            description: self.description,
            status,
            maintenance_message: self.maintenance_message,
            last_updated: self.last_updated,
            created_at: self.created_at,
        })
    }
}

/// CRUD and query operations over the monitored service catalog.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<ApplicationService>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ApplicationService>>;

    async fn find_by_status(&self, status: ServiceStatus) -> Result<Vec<ApplicationService>>;

    /// Everything that is not OPERATIONAL, i.e. the alerts list.
    async fn find_non_operational(&self) -> Result<Vec<ApplicationService>>;

    /// Case-insensitive name substring search.
    async fn search_by_name(&self, query: &str) -> Result<Vec<ApplicationService>>;

    async fn count(&self) -> Result<i64>;

    async fn exists_by_name(&self, name: &str) -> Result<bool>;

    async fn create(&self, service: NewApplicationService) -> Result<ApplicationService>;

    /// Full update; fails with a not-found error when the id is unknown.
    async fn update(&self, id: i64, update: UpdateApplicationService)
        -> Result<ApplicationService>;

    /// Status-only update, replacing the maintenance message.
    async fn update_status(
        &self,
        id: i64,
        status: ServiceStatus,
        maintenance_message: Option<String>,
    ) -> Result<ApplicationService>;

    async fn delete(&self, id: i64) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct SqlxServiceRepository {
    pool: DbPool,
}

impl SqlxServiceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn rows_to_services(rows: Vec<ServiceRow>) -> Result<Vec<ApplicationService>> {
        rows.into_iter().map(ServiceRow::into_service).collect()
    }
}

#[async_trait]
impl ServiceRepository for SqlxServiceRepository {
    #[instrument(skip(self), name = "db_list_services")]
    async fn list_all(&self) -> Result<Vec<ApplicationService>> {
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {} FROM application_services ORDER BY id",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to list services".to_string(),
        })?;

        Self::rows_to_services(rows)
    }

    #[instrument(skip(self), fields(service_id = id), name = "db_get_service")]
    async fn find_by_id(&self, id: i64) -> Result<Option<ApplicationService>> {
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {} FROM application_services WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch service".to_string(),
        })?;

        row.map(ServiceRow::into_service).transpose()
    }

    #[instrument(skip(self), fields(status = %status), name = "db_services_by_status")]
    async fn find_by_status(&self, status: ServiceStatus) -> Result<Vec<ApplicationService>> {
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {} FROM application_services WHERE status = $1 ORDER BY id",
            SELECT_COLUMNS
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch services by status".to_string(),
        })?;

        Self::rows_to_services(rows)
    }

    #[instrument(skip(self), name = "db_services_alerting")]
    async fn find_non_operational(&self) -> Result<Vec<ApplicationService>> {
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {} FROM application_services WHERE status != $1 ORDER BY id",
            SELECT_COLUMNS
        ))
        .bind(ServiceStatus::Operational.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch non-operational services".to_string(),
        })?;

        Self::rows_to_services(rows)
    }

    #[instrument(skip(self, query), name = "db_search_services")]
    async fn search_by_name(&self, query: &str) -> Result<Vec<ApplicationService>> {
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {} FROM application_services \
             WHERE name LIKE $1 COLLATE NOCASE ORDER BY id",
            SELECT_COLUMNS
        ))
        .bind(format!("%{}%", query))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to search services".to_string(),
        })?;

        Self::rows_to_services(rows)
    }

    #[instrument(skip(self), name = "db_count_services")]
    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM application_services")
            .fetch_one(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to count services".to_string(),
            })?;
        Ok(row.0)
    }

    #[instrument(skip(self), fields(name = %name), name = "db_service_name_exists")]
    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM application_services WHERE name = $1")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(|err| Error::Database {
                    source: err,
                    context: "Failed to check service name".to_string(),
                })?;
        Ok(row.0 > 0)
    }

    #[instrument(skip(self, service), fields(name = %service.name), name = "db_create_service")]
    async fn create(&self, service: NewApplicationService) -> Result<ApplicationService> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO application_services (name, description, status, maintenance_message, last_updated, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.status.as_str())
        .bind(&service.maintenance_message)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to create service".to_string(),
        })?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| Error::internal("Service not found after creation"))
    }

    #[instrument(skip(self, update), fields(service_id = id), name = "db_update_service")]
    async fn update(
        &self,
        id: i64,
        update: UpdateApplicationService,
    ) -> Result<ApplicationService> {
        let result = sqlx::query(
            r#"
            UPDATE application_services
            SET name = $1, description = $2, status = $3, maintenance_message = $4, last_updated = $5
            WHERE id = $6
            "#,
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.status.as_str())
        .bind(&update.maintenance_message)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to update service".to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Service", id.to_string()));
        }

        self.find_by_id(id).await?.ok_or_else(|| Error::internal("Service not found after update"))
    }

    #[instrument(skip(self), fields(service_id = id, status = %status), name = "db_update_service_status")]
    async fn update_status(
        &self,
        id: i64,
        status: ServiceStatus,
        maintenance_message: Option<String>,
    ) -> Result<ApplicationService> {
        let result = sqlx::query(
            r#"
            UPDATE application_services
            SET status = $1, maintenance_message = $2, last_updated = $3
            WHERE id = $4
            "#,
        )
        .bind(status.as_str())
        .bind(&maintenance_message)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to update service status".to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Service", id.to_string()));
        }

        self.find_by_id(id).await?.ok_or_else(|| Error::internal("Service not found after update"))
    }

    #[instrument(skip(self), fields(service_id = id), name = "db_delete_service")]
    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM application_services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to delete service".to_string(),
            })?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Service", id.to_string()));
        }

        Ok(())
    }
}
