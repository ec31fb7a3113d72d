//! Users backend entry-point: loads settings, prepares the record store and
//! serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{ServerConfig, ServerSettings, create_server, drain_on, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load().map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let mut config = ServerConfig::new(settings.bind_addr()?);

    if let Some(database_url) = settings.database_url() {
        run_migrations(database_url)
            .await
            .wrap_err("failed to migrate the users database")?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .wrap_err("failed to build the database pool")?;
        config = config.with_db_pool(pool);
    }
    info!(database = config.has_database(), "server configured");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), server.handle(), health_state));
    server.await?;
    info!("server stopped");
    Ok(())
}
