//! Backend entry-point: loads configuration, wires the store, and serves the
//! code claim API.

mod server;

use std::io;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, SessionSettings, load_session_key};
use backend::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use backend::settings::ServiceSettings;
use ortho_config::OrthoConfig;

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

    let settings = ServiceSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| io::Error::other(format!("invalid bind address: {e}")))?;
    let key = load_session_key(
        &settings.session_key_file(),
        settings.session_allow_ephemeral,
        BuildMode::from_debug_assertions(),
    )
    .map_err(io::Error::other)?;

    let mut config = ServerConfig::new(
        SessionSettings {
            key,
            cookie_secure: settings.cookie_secure(),
        },
        bind_addr,
    );
    if let Some(database_url) = settings.database_url.clone() {
        if settings.run_migrations {
            let url = database_url.clone();
            let applied = web::block(move || apply_migrations(&url))
                .await
                .map_err(io::Error::other)?
                .map_err(io::Error::other)?;
            info!(applied, "database migrations applied");
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting lovnity backend");
    create_server(health_state, config)?.await
}
