//! One-shot fetch of the published sheet: runs the full
//! fetch-parse-validate cycle once and prints the snapshot as JSON.
//! Useful for checking a sheet URL before pointing the service at it.

use std::time::Duration;

use anyhow::Result;
use sheet_service::{config::AppConfig, ingest, observability, sources::PublishedSheetSource};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let cfg = AppConfig::load()?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.sheet.fetch_timeout_secs))
        .build()?;
    let source = PublishedSheetSource::new(client, cfg.sheet.url.clone());

    let snapshot = ingest::load_snapshot(&source, &cfg.parse_options()).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
