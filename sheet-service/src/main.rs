use std::{sync::Arc, time::Duration};

use anyhow::Result;
use sheet_service::{
    config::AppConfig,
    metrics_server, observability,
    server::{self, AppState},
    sources::PublishedSheetSource,
};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr);
    }

    // One pooled outbound client for all requests; the timeout keeps an
    // unresponsive sheet from blocking a request indefinitely.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.sheet.fetch_timeout_secs))
        .build()?;

    let state = Arc::new(AppState {
        source: Arc::new(PublishedSheetSource::new(client, cfg.sheet.url.clone())),
        parse: cfg.parse_options(),
    });

    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr).await?;
    tracing::info!(addr = %cfg.server.bind_addr, "sheet service listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
