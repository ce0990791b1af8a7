//! Repository traits and their `sqlx` implementations.

pub mod service;
pub mod user;

pub use service::{ServiceRepository, SqlxServiceRepository};
pub use user::{SqlxUserRepository, UserRepository};
