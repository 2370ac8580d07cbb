//! Backend entry-point: loads settings, applies migrations, and serves the
//! blog REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog_backend::inbound::http::health::HealthState;
use blog_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::session_key::{BuildMode, key_fingerprint, load_session_key};
use server::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let database_url = settings.database_url()?;
    let bind_addr = settings.bind_addr()?;

    let key = load_session_key(
        settings.session_key_file(),
        BuildMode::from_debug_assertions(),
        settings.allow_ephemeral_key,
    )?;
    info!(fingerprint = %key_fingerprint(&key), "session key loaded");

    run_pending_migrations(database_url)
        .await
        .wrap_err("database migrations failed")?;

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()?))
        .await
        .wrap_err("failed to build database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, settings.cookie_secure, bind_addr, pool)
        .with_same_site(settings.same_site()?);
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await?;
    Ok(())
}
