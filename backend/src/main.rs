//! Service entry-point: loads settings, selects the user store, and runs the
//! HTTP server until shutdown.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster::inbound::http::health::HealthState;
use server::{AppSettings, ServerConfig, UserStore, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os()).map_err(|err| {
        error!(error = %err, "failed to load settings");
        std::io::Error::other(err.to_string())
    })?;
    let config = ServerConfig::from_settings(&settings).inspect_err(|err| {
        error!(error = %err, "invalid server settings");
    })?;

    let health_state = web::Data::new(HealthState::new());
    let store = UserStore::for_backend(config.backend());
    let server = create_server(health_state.clone(), &config, &store).inspect_err(|err| {
        error!(error = %err, port = config.bind_addr().port(), "failed to bind listener");
    })?;

    let result = server.await;
    health_state.mark_unhealthy();
    store.shutdown().await;
    result
}
