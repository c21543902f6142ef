//! HTTP Server and Scrape Loop
//!
//! This module wires the two independent paths of the exporter together.
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing the metrics path and nothing else
//! - **Scrape Loop**: [`ScrapeScheduler`] task that scrapes the dashboard on a fixed delay
//! - **State Management**: the [`MetricsCollector`] is shared between both paths;
//!   the dashboard client lives only inside the scrape task
//!
//! # Error Handling
//!
//! Scrape failures are logged and leave the gauges untouched. Only a failure to
//! bind or serve the HTTP listener ends [`start`].

use crate::config::Config;
use crate::error::ExporterError;
use crate::metrics::MetricsCollector;
use crate::scheduler::{ScrapeScheduler, TankScrapeJob};
use crate::smartoil::SmartOilClient;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    metrics: MetricsCollector,
}

/// Build the router serving `metrics` at `metrics_path`.
pub fn router(metrics: MetricsCollector, metrics_path: &str) -> Router {
    Router::new()
        .route(metrics_path, get(metrics_handler))
        .with_state(AppState { metrics })
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let metrics = MetricsCollector::new()?;
    let client = SmartOilClient::from_config(&config.smartoil)?;

    // Start background scraping
    let job = TankScrapeJob::new(client, metrics.clone());
    let scheduler = ScrapeScheduler::start(job, config.metrics.scrape_interval);

    let app = router(metrics, &config.server.metrics_path);

    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ExporterError::Server(format!("failed to bind {}: {}", addr, e)))?;

    info!("Metrics server listening on {}", addr);
    info!(
        "Metrics available at http://{}{}",
        addr, config.server.metrics_path
    );

    let served = axum::serve(listener, app).await;

    scheduler.stop().await?;
    served.map_err(|e| ExporterError::Server(e.to_string()))?;

    Ok(())
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(metrics) => (
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            metrics,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}
