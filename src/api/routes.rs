//! Router assembly.
//!
//! Builds the full HTTP surface and wires the middleware chain. Order
//! matters: `authenticate` runs first on every request and only resolves a
//! principal; `enforce_policy` then rejects protected paths lacking one;
//! per-route `ensure_role` layers guard the mutating endpoints.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::jwt::TokenService;
use crate::auth::login_service::LoginService;
use crate::auth::middleware::{authenticate, enforce_policy, ensure_role, AuthState, PolicyState};
use crate::auth::models::Role;
use crate::auth::policy::AuthorizationPolicy;
use crate::config::AppConfig;
use crate::storage::repositories::{
    ServiceRepository, SqlxServiceRepository, SqlxUserRepository, UserRepository,
};
use crate::storage::DbPool;

use super::docs;
use super::handlers::{
    create_service_handler, delete_service_handler, get_alerts_handler, get_service_handler,
    get_services_by_status_handler, health_handler, health_summary_handler, list_services_handler,
    login_handler, me_handler, search_services_handler, update_service_handler,
    update_service_status_handler,
};

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    pub services: Arc<dyn ServiceRepository>,
    pub login_service: Arc<LoginService>,
}

/// Build the application router over the given pool.
///
/// Fails when the auth configuration is unusable (missing signing key), so
/// a misconfigured deployment dies at startup rather than per request.
pub fn build_router(pool: DbPool, config: &AppConfig) -> crate::Result<Router> {
    let token_service = Arc::new(TokenService::from_config(&config.auth)?);
    let users: Arc<dyn UserRepository> = Arc::new(SqlxUserRepository::new(pool.clone()));
    let services: Arc<dyn ServiceRepository> = Arc::new(SqlxServiceRepository::new(pool));
    let login_service = Arc::new(LoginService::new(users.clone(), token_service.clone()));

    let api_state = ApiState { services, login_service };

    let auth_layer = middleware::from_fn_with_state(
        AuthState { token_service, user_repository: users },
        authenticate,
    );
    let policy: PolicyState = Arc::new(AuthorizationPolicy::default());
    let policy_layer = middleware::from_fn_with_state(policy, enforce_policy);
    let admin_only = middleware::from_fn_with_state(Role::Admin, ensure_role);

    let router = Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/me", get(me_handler))
        .route("/api/services", get(list_services_handler))
        .route("/api/services/{id}", get(get_service_handler))
        .route("/api/services/status/{status}", get(get_services_by_status_handler))
        .route("/api/services/alerts", get(get_alerts_handler))
        .route("/api/services/search", get(search_services_handler))
        .route("/api/services/health-summary", get(health_summary_handler))
        .merge(
            Router::new()
                .route("/api/services", post(create_service_handler))
                .route(
                    "/api/services/{id}",
                    put(update_service_handler).delete(delete_service_handler),
                )
                .route("/api/services/{id}/status", patch(update_service_status_handler))
                .route_layer(admin_only),
        )
        .route("/health", get(health_handler))
        .with_state(api_state)
        .merge(docs::docs_router())
        .layer(policy_layer)
        .layer(auth_layer)
        .layer(TraceLayer::new_for_http());

    let router =
        if config.server.enable_cors { router.layer(CorsLayer::permissive()) } else { router };

    Ok(router)
}
