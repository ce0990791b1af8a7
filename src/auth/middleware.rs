//! Axum middleware for authentication and authorization.
//!
//! `authenticate` runs once per request and only ever *adds* information: it
//! resolves a bearer token into a request-scoped [`AuthContext`] when it
//! can, and passes the request through untouched when it cannot. Rejection
//! is the policy layer's job (`enforce_policy`), with per-route role checks
//! (`ensure_role`) layered on top of that.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info_span, warn, Instrument};

use crate::api::error::ApiError;
use crate::auth::jwt::TokenService;
use crate::auth::models::{AuthContext, Role};
use crate::auth::policy::{Access, AuthorizationPolicy};
use crate::storage::repositories::UserRepository;

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub token_service: Arc<TokenService>,
    pub user_repository: Arc<dyn UserRepository>,
}

pub type PolicyState = Arc<AuthorizationPolicy>;

/// Middleware entry point that resolves the request's principal.
///
/// Never rejects: every failure mode degrades to "no principal" and the
/// request continues down the chain. Idempotent: a context populated by an
/// earlier filter is left untouched.
pub async fn authenticate(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if request.extensions().get::<AuthContext>().is_some() {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let correlation_id = uuid::Uuid::new_v4();
    let span = info_span!(
        "auth_middleware.authenticate",
        http.method = %method,
        http.path = %path,
        correlation_id = %correlation_id
    );

    async move {
        let Some(token) = bearer_token(request.headers()) else {
            return next.run(request).await;
        };
        let token = token.to_string();

        let claims = match state.token_service.validate(&token) {
            Ok(claims) => claims,
            Err(err) => {
                debug!(%correlation_id, error = %err, "token rejected");
                return next.run(request).await;
            }
        };

        // Resolve the subject against the credential store. A token for a
        // since-deleted user must not authenticate.
        let user = match state.user_repository.find_by_username(&claims.sub).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(%correlation_id, subject = %claims.sub, "token subject no longer exists");
                return next.run(request).await;
            }
            Err(err) => {
                warn!(%correlation_id, error = %err, "credential store lookup failed");
                return next.run(request).await;
            }
        };

        if !user.enabled {
            debug!(%correlation_id, username = %user.username, "token subject is disabled");
            return next.run(request).await;
        }

        // Redundant subject-binding re-check, guarding against any
        // subject-substitution slip between validation and lookup.
        if !state.token_service.is_valid_for(&token, &user.username) {
            debug!(%correlation_id, username = %user.username, "subject binding check failed");
            return next.run(request).await;
        }

        // Build the principal from the credential store's *current* roles,
        // not the token's embedded claim: a stale token must not grant
        // roles the user no longer holds.
        let context = AuthContext::new(user.username, user.full_name, user.roles);
        request.extensions_mut().insert(context);

        next.run(request).await
    }
    .instrument(span)
    .await
}

/// Middleware entry point that enforces the route-classification policy.
///
/// A request to a protected path with no populated context is rejected here,
/// before any handler runs.
pub async fn enforce_policy(
    State(policy): State<PolicyState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // CORS preflights carry no credentials by design.
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    match policy.classify(request.method(), request.uri().path()) {
        Access::Public => Ok(next.run(request).await),
        Access::Authenticated => {
            if request.extensions().get::<AuthContext>().is_some() {
                Ok(next.run(request).await)
            } else {
                warn!(
                    http.method = %request.method(),
                    http.path = %request.uri().path(),
                    "unauthenticated request to protected path"
                );
                Err(ApiError::unauthorized("Unauthorized: authentication required"))
            }
        }
    }
}

/// Per-route middleware that requires a specific role on the principal.
pub async fn ensure_role(
    State(required): State<Role>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    match request.extensions().get::<AuthContext>() {
        Some(context) if context.has_role(required) => Ok(next.run(request).await),
        Some(context) => {
            warn!(
                username = %context.username,
                required = %required,
                http.path = %request.uri().path(),
                "role check failed"
            );
            Err(ApiError::forbidden("Forbidden: insufficient role"))
        }
        None => Err(ApiError::unauthorized("Unauthorized: authentication required")),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_extraction() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers_with("Bearer   padded  ")), Some("padded"));
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&headers_with("bearer abc")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
