use servicepulse::{
    api::{build_router, start_api_server},
    config::{AppConfig, ObservabilityConfig},
    observability::init_tracing,
    storage::{create_pool, ensure_default_users, run_migrations, repositories::SqlxUserRepository},
    Result, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing).
    // This must happen before any config is read from the environment.
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let observability_config = ObservabilityConfig::from_env();
    init_tracing(&observability_config)?;

    info!(app_name = APP_NAME, version = VERSION, "Starting ServicePulse backend");

    let config = AppConfig::from_env()?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        token_ttl_seconds = config.auth.token_ttl_seconds,
        "Loaded configuration from environment"
    );

    let pool = create_pool(&config.database).await?;

    if config.database.auto_migrate {
        run_migrations(&pool).await?;
    }

    let users = SqlxUserRepository::new(pool.clone());
    ensure_default_users(&users).await?;

    let router = build_router(pool, &config)?;
    start_api_server(&config.server, router).await
}
