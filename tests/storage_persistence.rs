//! Integration tests for file-backed persistence.
//!
//! The other suites run against in-memory databases; this one verifies that
//! seeded accounts and catalog entries survive a pool teardown and reopen,
//! the way a real deployment restarts.

use tempfile::TempDir;

use servicepulse::auth::models::Role;
use servicepulse::config::DatabaseConfig;
use servicepulse::domain::{NewApplicationService, ServiceStatus};
use servicepulse::storage::repositories::{
    ServiceRepository, SqlxServiceRepository, SqlxUserRepository, UserRepository,
};
use servicepulse::storage::{create_pool, ensure_default_users, run_migrations};

fn file_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig {
        url: format!("sqlite://{}/pulse.db", dir.path().display()),
        max_connections: 2,
        ..DatabaseConfig::default()
    }
}

#[tokio::test]
async fn state_survives_a_pool_reopen() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    {
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let users = SqlxUserRepository::new(pool.clone());
        ensure_default_users(&users).await.unwrap();

        let services = SqlxServiceRepository::new(pool.clone());
        services
            .create(NewApplicationService {
                name: "api-gateway".into(),
                description: None,
                status: ServiceStatus::Degraded,
                maintenance_message: None,
            })
            .await
            .unwrap();

        pool.close().await;
    }

    let pool = create_pool(&config).await.unwrap();
    // Migrations are idempotent across restarts.
    run_migrations(&pool).await.unwrap();

    let users = SqlxUserRepository::new(pool.clone());
    let admin = users.find_by_username("admin").await.unwrap().unwrap();
    assert_eq!(admin.roles, vec![Role::Admin, Role::Lecteur]);

    let services = SqlxServiceRepository::new(pool);
    let all = services.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "api-gateway");
    assert_eq!(all[0].status, ServiceStatus::Degraded);
}
