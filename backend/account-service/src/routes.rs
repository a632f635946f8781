/// Route table
use actix_middleware::JwtAuthMiddleware;
use actix_web::web;
use crypto_core::SessionTokens;
use std::sync::Arc;

use crate::{error::AccountError, handlers, metrics};

/// Register every account-service route on `cfg`
///
/// `/users` and `/user` require a bearer session token.
pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<SessionTokens>) {
    cfg.app_data(json_config())
        .route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health_check))
        .route("/metrics", web::get().to(metrics::metrics_handler))
        .route("/register", web::post().to(handlers::register))
        .route("/login", web::post().to(handlers::login))
        .service(
            web::resource("/users")
                .wrap(JwtAuthMiddleware::new(tokens.clone()))
                .route(web::get().to(handlers::get_user)),
        )
        .service(
            web::resource("/user")
                .wrap(JwtAuthMiddleware::new(tokens))
                .route(web::put().to(handlers::update_user))
                .route(web::delete().to(handlers::delete_user)),
        );
}

/// Malformed JSON bodies are reported in the same error shape as everything else
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| AccountError::BadRequest(err.to_string()).into())
}
