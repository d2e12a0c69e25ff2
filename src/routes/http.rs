// GET handlers: root, version, metrics

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};

use super::AppState;
use crate::metrics::CONTENT_TYPE;
use crate::version::{NAME, VERSION};

/// GET /: small landing page pointing at the metrics path.
pub(super) async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Html(format!(
        "<html>\n<head><title>Linode Exporter</title></head>\n<body>\n<h1>Linode Exporter</h1>\n<p><a href=\"{path}\">Metrics</a></p>\n</body>\n</html>\n",
        path = state.metrics_path
    ))
}

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET <metrics_path>: one full scrape across every registered collector.
pub(super) async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.registry.scrape().await;
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], body)
}
