//! OpenAPI document and Swagger UI wiring.

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::auth::{LoginBody, LoginResponseBody, MeResponseBody};
use crate::api::handlers::health::HealthResponse;
use crate::api::handlers::services::{HealthSummaryResponse, ServiceBody, UpdateStatusBody};
use crate::auth::models::Role;
use crate::domain::{ApplicationService, ServiceStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::auth::login_handler,
        crate::api::handlers::auth::me_handler,
        crate::api::handlers::services::list_services_handler,
        crate::api::handlers::services::get_service_handler,
        crate::api::handlers::services::get_services_by_status_handler,
        crate::api::handlers::services::get_alerts_handler,
        crate::api::handlers::services::search_services_handler,
        crate::api::handlers::services::health_summary_handler,
        crate::api::handlers::services::create_service_handler,
        crate::api::handlers::services::update_service_handler,
        crate::api::handlers::services::update_service_status_handler,
        crate::api::handlers::services::delete_service_handler,
    ),
    components(schemas(
        HealthResponse,
        LoginBody,
        LoginResponseBody,
        MeResponseBody,
        ServiceBody,
        UpdateStatusBody,
        HealthSummaryResponse,
        ApplicationService,
        ServiceStatus,
        Role,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "services", description = "Service catalog and dashboard views"),
        (name = "health", description = "Operational health checks"),
    ),
    info(
        title = "ServicePulse API",
        description = "Dashboard backend for tracking application-service health statuses"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Router serving the Swagger UI and the raw OpenAPI document.
pub fn docs_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
