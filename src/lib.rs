pub(crate) mod controllers;
pub(crate) mod core;
pub(crate) mod routes;
pub(crate) mod token;
pub(crate) mod utils;
pub(crate) mod workers;

use std::sync::Arc;
use std::time::Duration;

use config::Config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::core::clock::SystemClock;
use crate::core::config::{Args, split_list};
use crate::core::error::ConfigError as Error;
use crate::core::state::AppState;
use crate::utils::cors::CorsPolicy;
use crate::workers::sweeper::sweep_loop;

pub async fn run() -> Result<(), Error> {
    let config = Config::builder()
        .add_source(config::File::with_name("dsvtoken").required(false))
        .add_source(config::Environment::with_prefix("DSVTOKEN"))
        .build()
        .map_err(Error::Config)?;

    let config = config.try_deserialize::<Args>().map_err(Error::Config)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_level).unwrap_or_default())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cors = CorsPolicy::new(
        split_list(&config.allowed_origins),
        &split_list(&config.allowed_methods),
        Duration::from_secs(config.cors_max_age),
    )?;

    let state = AppState::new(Arc::new(SystemClock), cors, &config.remote_user_header)?;

    if config.sweep_interval > 0 {
        let controller = state.token_controller.clone();
        let every = Duration::from_secs(config.sweep_interval);

        tokio::spawn(async move {
            sweep_loop(controller, every).await;
        });
    }

    let app = routes::router::routes(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(Error::IO)?;

    tracing::debug!("listening on port {}", config.port);

    axum::serve(listener, app).await.map_err(Error::IO)?;

    Ok(())
}
