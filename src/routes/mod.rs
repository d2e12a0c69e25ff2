// HTTP routes: landing page, version, and the scrape endpoint

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::registry::Registry;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) registry: Arc<Registry>,
    pub(crate) metrics_path: String,
}

pub fn app(registry: Arc<Registry>, config: &AppConfig) -> Router {
    let metrics_path = config.server.metrics_path.clone();
    let state = AppState {
        registry,
        metrics_path: metrics_path.clone(),
    };
    Router::new()
        .route("/", get(http::root_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route(&metrics_path, get(http::metrics_handler)) // GET /metrics
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
