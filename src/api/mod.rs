//! # REST API Layer
//!
//! Axum-based HTTP surface: routes, handlers, the API error envelope, the
//! OpenAPI document, and server startup.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use routes::{build_router, ApiState};
pub use server::start_api_server;
