//! Contacts service entry-point: loads settings, migrates, and serves HTTP.

mod server;

use std::io;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contacts::inbound::http::health::HealthState;
use contacts::outbound::persistence::{DbPool, run_pending_migrations};
use contacts::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_env().map_err(io::Error::other)?;
    let pool_config = settings.pool_config().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    if settings.run_migrations() {
        let applied = run_pending_migrations(pool_config.database_url())
            .await
            .map_err(io::Error::other)?;
        info!(applied, "database migrations applied");
    }

    let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
    let config = ServerConfig::new(bind_addr, pool);
    info!(addr = %config.bind_addr(), "starting contacts service");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();

    actix_web::rt::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for shutdown signal");
            return;
        }
        info!("shutdown requested");
        health_state.mark_unhealthy();
        handle.stop(true).await;
    });

    server.await
}
