use anyhow::Result;
use linode_exporter::*;
use std::sync::Arc;
use tikv_jemallocator::Jemalloc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    if version::GIT_COMMIT.is_empty() {
        tracing::warn!("GIT_COMMIT was not set at build time");
    }
    if version::OS_VERSION.is_empty() {
        tracing::warn!("OS_VERSION was not set at build time");
    }

    let app_config = config::AppConfig::load()?;
    let client: Arc<dyn client::ResourceClient> =
        Arc::new(client::LinodeClient::new(&app_config.linode)?);
    let options = collector::CollectorOptions::from(&app_config.collection);

    let mut registry = registry::Registry::new(options.pass_timeout);
    let registered =
        registry.register_enabled(&app_config.collection.collectors, client, options)?;
    anyhow::ensure!(registered > 0, "no known collectors enabled");
    tracing::info!(collectors = ?registry.collector_names(), "collectors registered");

    let app = routes::app(Arc::new(registry), &app_config);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Serving metrics on http://{}{}",
        addr,
        app_config.server.metrics_path
    );

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = async {
            #[cfg(unix)]
            {
                let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(s) => s,
                    Err(_) => {
                        let _ = tokio::signal::ctrl_c().await;
                        return;
                    }
                };
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            #[cfg(not(unix))]
            {
                let _ = tokio::signal::ctrl_c().await;
            }
        } => {
            tracing::info!("Received shutdown signal");
        }
    }

    Ok(())
}
