//! Account service: registration, login and self-service management of a
//! user record, authenticated with a signed session token.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod validators;

#[cfg(test)]
mod tests;

pub use error::{AccountError, Result};
pub use services::IdentityService;

/// Shared state handed to every handler through `web::Data`
#[derive(Clone)]
pub struct AppState {
    pub identity: IdentityService,
}

impl AppState {
    pub fn new(identity: IdentityService) -> Self {
        Self { identity }
    }
}
