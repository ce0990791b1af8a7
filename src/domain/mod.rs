//! Domain layer
//!
//! Pure domain entities with zero infrastructure dependencies. These types
//! represent the monitored services the dashboard tracks and can be tested
//! without a database or HTTP stack.

pub mod service;

pub use service::{
    ApplicationService, NewApplicationService, ServiceStatus, ServiceStatusParseError,
    UpdateApplicationService,
};
