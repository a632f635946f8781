use actix_middleware::MetricsMiddleware;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use chrono::Duration;
use crypto_core::SessionTokens;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

use account_service::{
    config::Config,
    db::{self, PgIdentityStore},
    metrics, routes, telemetry, AppState, IdentityService,
};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(config.json_logs());
    info!(?config, "Starting account-service");

    let tokens = Arc::new(
        SessionTokens::new(&config.jwt_secret)
            .context("Failed to initialize session tokens")?
            .with_validity(Duration::hours(config.token_ttl_hours)),
    );

    metrics::init_metrics();

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to connect to database")?;

    if config.run_migrations {
        db::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Database migrations completed");
    }

    let store = Arc::new(PgIdentityStore::new(pool));
    let state = web::Data::new(AppState::new(IdentityService::new(store, tokens.clone())));

    let bind_addr = (config.app_host.clone(), config.app_port);
    info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let tokens = tokens.clone();
        App::new()
            .app_data(state.clone())
            .wrap(MetricsMiddleware)
            .wrap(TracingLogger::default())
            .configure(move |cfg| routes::configure(cfg, tokens))
    })
    .bind(bind_addr)
    .context("Failed to bind HTTP listener")?
    .run()
    .await
    .context("HTTP server error")?;

    info!("account-service stopped");
    Ok(())
}
