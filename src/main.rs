// src/main.rs

use std::{net::SocketAddr, sync::Arc};

use dotenvy::dotenv;
use practice_server::{
    config::{Config, DEV_JWT_SECRET},
    identity::{GoogleProvider, IdentityProvider},
    routes,
    state::AppState,
    store::Stores,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if config.jwt_secret == DEV_JWT_SECRET {
        tracing::warn!("JWT_SECRET not set, using the development secret");
    }

    let stores = Stores::connect(&config).await?;

    let identity_provider = GoogleProvider::from_config(&config)
        .map(|provider| Arc::new(provider) as Arc<dyn IdentityProvider>);
    if identity_provider.is_none() {
        tracing::info!("Google OAuth not configured; login is disabled");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config, stores, identity_provider);
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
