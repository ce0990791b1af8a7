//! Service catalog endpoints: CRUD plus the read-only dashboard views.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::error::ApiError;
use crate::api::routes::ApiState;
use crate::domain::{
    ApplicationService, NewApplicationService, ServiceStatus, UpdateApplicationService,
};
use crate::errors::Error;

/// Create/update payload for a monitored service.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBody {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    /// Defaults to OPERATIONAL when omitted on creation.
    pub status: Option<ServiceStatus>,
    #[validate(length(max = 1000, message = "Maintenance message cannot exceed 1000 characters"))]
    pub maintenance_message: Option<String>,
}

/// Status patch payload. The status arrives as a plain string so unknown
/// values surface as a 400, not a deserialization failure.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusBody {
    pub status: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Name substring to search for (case-insensitive)
    pub q: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummaryResponse {
    pub total_services: i64,
    pub all_operational: bool,
    pub alert_count: usize,
    pub alerts: Vec<ApplicationService>,
}

#[utoipa::path(
    get,
    path = "/api/services",
    responses((status = 200, description = "All monitored services", body = [ApplicationService])),
    tag = "services"
)]
pub async fn list_services_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<ApplicationService>>, ApiError> {
    let services = state.services.list_all().await.map_err(ApiError::from)?;
    Ok(Json(services))
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(("id" = i64, Path, description = "Service identifier")),
    responses(
        (status = 200, description = "Service details", body = ApplicationService),
        (status = 404, description = "Service not found")
    ),
    tag = "services"
)]
pub async fn get_service_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<ApplicationService>, ApiError> {
    let service = state
        .services
        .find_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Service with ID '{}' not found", id)))?;
    Ok(Json(service))
}

#[utoipa::path(
    get,
    path = "/api/services/status/{status}",
    params(("status" = String, Path, description = "Service status filter")),
    responses(
        (status = 200, description = "Services with the given status", body = [ApplicationService]),
        (status = 400, description = "Unknown status value")
    ),
    tag = "services"
)]
pub async fn get_services_by_status_handler(
    State(state): State<ApiState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<ApplicationService>>, ApiError> {
    let status = ServiceStatus::from_str(&status)
        .map_err(|err| ApiError::bad_request(err.to_string()))?;
    let services = state.services.find_by_status(status).await.map_err(ApiError::from)?;
    Ok(Json(services))
}

#[utoipa::path(
    get,
    path = "/api/services/alerts",
    responses((status = 200, description = "Services needing attention", body = [ApplicationService])),
    tag = "services"
)]
pub async fn get_alerts_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<ApplicationService>>, ApiError> {
    let services = state.services.find_non_operational().await.map_err(ApiError::from)?;
    Ok(Json(services))
}

#[utoipa::path(
    get,
    path = "/api/services/search",
    params(SearchQuery),
    responses((status = 200, description = "Matching services", body = [ApplicationService])),
    tag = "services"
)]
pub async fn search_services_handler(
    State(state): State<ApiState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<ApplicationService>>, ApiError> {
    let services = state.services.search_by_name(&params.q).await.map_err(ApiError::from)?;
    Ok(Json(services))
}

#[utoipa::path(
    get,
    path = "/api/services/health-summary",
    responses((status = 200, description = "Aggregate health overview", body = HealthSummaryResponse)),
    tag = "services"
)]
pub async fn health_summary_handler(
    State(state): State<ApiState>,
) -> Result<Json<HealthSummaryResponse>, ApiError> {
    let total_services = state.services.count().await.map_err(ApiError::from)?;
    let alerts = state.services.find_non_operational().await.map_err(ApiError::from)?;

    Ok(Json(HealthSummaryResponse {
        total_services,
        all_operational: alerts.is_empty(),
        alert_count: alerts.len(),
        alerts,
    }))
}

#[utoipa::path(
    post,
    path = "/api/services",
    request_body = ServiceBody,
    responses(
        (status = 201, description = "Service created", body = ApplicationService),
        (status = 400, description = "Validation error"),
        (status = 409, description = "A service with this name already exists")
    ),
    security(("bearerAuth" = [])),
    tag = "services"
)]
pub async fn create_service_handler(
    State(state): State<ApiState>,
    Json(payload): Json<ServiceBody>,
) -> Result<(StatusCode, Json<ApplicationService>), ApiError> {
    payload.validate().map_err(|err| ApiError::from(Error::from(err)))?;

    if state.services.exists_by_name(&payload.name).await.map_err(ApiError::from)? {
        return Err(ApiError::Conflict(format!(
            "A service named '{}' already exists",
            payload.name
        )));
    }

    let created = state
        .services
        .create(NewApplicationService {
            name: payload.name,
            description: payload.description,
            status: payload.status.unwrap_or(ServiceStatus::Operational),
            maintenance_message: payload.maintenance_message,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/services/{id}",
    request_body = ServiceBody,
    params(("id" = i64, Path, description = "Service identifier")),
    responses(
        (status = 200, description = "Service updated", body = ApplicationService),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Service not found")
    ),
    security(("bearerAuth" = [])),
    tag = "services"
)]
pub async fn update_service_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<ServiceBody>,
) -> Result<Json<ApplicationService>, ApiError> {
    payload.validate().map_err(|err| ApiError::from(Error::from(err)))?;

    let updated = state
        .services
        .update(
            id,
            UpdateApplicationService {
                name: payload.name,
                description: payload.description,
                status: payload.status.unwrap_or(ServiceStatus::Operational),
                maintenance_message: payload.maintenance_message,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(updated))
}

#[utoipa::path(
    patch,
    path = "/api/services/{id}/status",
    request_body = UpdateStatusBody,
    params(("id" = i64, Path, description = "Service identifier")),
    responses(
        (status = 200, description = "Status updated", body = ApplicationService),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Service not found")
    ),
    security(("bearerAuth" = [])),
    tag = "services"
)]
pub async fn update_service_status_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusBody>,
) -> Result<Json<ApplicationService>, ApiError> {
    let status = ServiceStatus::from_str(&payload.status)
        .map_err(|err| ApiError::bad_request(err.to_string()))?;

    let updated = state
        .services
        .update_status(id, status, payload.message)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    params(("id" = i64, Path, description = "Service identifier")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 404, description = "Service not found")
    ),
    security(("bearerAuth" = [])),
    tag = "services"
)]
pub async fn delete_service_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.delete(id).await.map_err(ApiError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
