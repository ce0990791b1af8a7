//! Authentication endpoints: login and identity echo.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::error::ApiError;
use crate::api::routes::ApiState;
use crate::auth::models::{AuthContext, Role};
use crate::errors::Error;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseBody {
    pub token: String,
    pub username: String,
    pub full_name: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponseBody {
    pub username: String,
    pub full_name: String,
    pub roles: Vec<Role>,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseBody),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid username or password"),
        (status = 403, description = "Account disabled")
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<ApiState>,
    Json(payload): Json<LoginBody>,
) -> Result<Json<LoginResponseBody>, ApiError> {
    payload.validate().map_err(|err| ApiError::from(Error::from(err)))?;

    let outcome = state.login_service.login(&payload.username, &payload.password).await?;

    Ok(Json(LoginResponseBody {
        token: outcome.token,
        username: outcome.user.username,
        full_name: outcome.user.full_name,
        roles: outcome.user.roles,
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Authenticated principal", body = MeResponseBody),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearerAuth" = [])),
    tag = "auth"
)]
pub async fn me_handler(Extension(context): Extension<AuthContext>) -> Json<MeResponseBody> {
    Json(MeResponseBody {
        username: context.username.clone(),
        full_name: context.full_name.clone(),
        roles: context.roles().to_vec(),
    })
}
