use axum::Router;
use std::sync::Arc;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::state::AppState;
use crate::web::form;

/// Build the full axum Router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Rate limiting on the save endpoint: 30 requests per minute per IP
    // Uses PeerIpKeyExtractor which reads from ConnectInfo<SocketAddr>
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2) // 1 token every 2 seconds = 30 per minute
            .burst_size(10)
            .finish()
            .expect("Failed to build governor config"),
    );
    let governor_limiter = governor_config.limiter().clone();

    // Spawn background task to clean up rate limiter state
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            governor_limiter.retain_recent();
        }
    });

    let save_routes = Router::new()
        .route("/shortng", axum::routing::post(handlers::shorten))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Retrieval and the web form are public and unthrottled; the viewer
    // fetches stored state directly.
    let public_routes = Router::new()
        .route("/", axum::routing::get(form::shortener_page))
        .route("/shortener.html", axum::routing::get(form::shortener_page))
        .route("/short/{*filename}", axum::routing::get(handlers::get_state));

    // Health check
    let health = Router::new().route("/health", axum::routing::get(handlers::health_check));

    // TODO: restrict CORS to the known viewer origins once they are settled
    Router::new()
        .merge(save_routes)
        .merge(public_routes)
        .merge(health)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
