//! HTTP request handlers.

pub mod auth;
pub mod health;
pub mod services;

pub use auth::{login_handler, me_handler};
pub use health::health_handler;
pub use services::{
    create_service_handler, delete_service_handler, get_alerts_handler, get_service_handler,
    get_services_by_status_handler, health_summary_handler, list_services_handler,
    search_services_handler, update_service_handler, update_service_status_handler,
};
