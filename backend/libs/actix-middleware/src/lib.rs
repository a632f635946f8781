//! # Actix Middleware Library
//!
//! Middleware components for the account backend's Actix services
//!
//! ## Modules
//! - `jwt_auth`: bearer session-token authentication
//! - `metrics`: Prometheus HTTP metrics middleware

pub mod jwt_auth;
pub mod metrics;

pub use jwt_auth::{AuthError, AuthenticatedUser, JwtAuthMiddleware};
pub use metrics::MetricsMiddleware;
