mod api;
mod clock;
mod config;
mod error;
mod links;
mod routes;
mod state;
mod store;
mod web;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use clock::SystemClock;
use config::{generate_config_template, Config};
use links::guard::EditGuard;
use store::FsLinkStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load config with layered precedence: defaults < TOML < env < CLI
    let config = Config::load()?;

    // Handle --generate-config: print template and exit
    if config.generate_config {
        print!("{}", generate_config_template());
        return Ok(());
    }

    // Initialize tracing/logging
    if config.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "shortng_server=info".parse().unwrap()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "shortng_server=info".parse().unwrap()),
            )
            .init();
    }

    tracing::info!("shortng server v{} starting", env!("CARGO_PKG_VERSION"));

    // Open the filesystem link store
    let store = Arc::new(FsLinkStore::open(&config.data_dir)?);
    tracing::info!("Link store opened under {}/short", config.data_dir);

    let clock: Arc<dyn clock::Clock> = Arc::new(SystemClock);
    let guard = EditGuard::new(
        chrono::Duration::days(config.edit_expiration_days),
        clock.clone(),
    );

    // Build application state
    let app_state = state::AppState {
        store,
        clock,
        guard,
        viewer_url: config.viewer_url.clone(),
        public_url: config.public_url.clone(),
    };

    // Build router
    let app = routes::build_router(app_state);

    // Bind and serve
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
