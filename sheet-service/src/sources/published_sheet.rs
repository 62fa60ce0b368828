use tracing::info;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request to published sheet failed: {0}")]
    Transport(String),
    #[error("published sheet returned HTTP {0}")]
    Status(u16),
}

/// Where raw CSV text comes from. A trait so handlers and tests can swap
/// in a canned source without a network.
#[async_trait::async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_csv(&self) -> Result<String, FetchError>;
}

/// Fetches the published-sheet CSV over HTTP. One plain GET, no retries:
/// a failed attempt surfaces immediately to the caller. The client carries
/// an explicit timeout so an unresponsive sheet cannot hang a request.
pub struct PublishedSheetSource {
    client: reqwest::Client,
    url: String,
}

impl PublishedSheetSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl SheetSource for PublishedSheetSource {
    async fn fetch_csv(&self) -> Result<String, FetchError> {
        metrics::counter!("sheet_fetch_requests_total").increment(1);
        info!(url = %self.url, "fetching published sheet");

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| {
                metrics::counter!("sheet_fetch_failures_total").increment(1);
                FetchError::Transport(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            metrics::counter!("sheet_fetch_failures_total").increment(1);
            return Err(FetchError::Status(status.as_u16()));
        }

        resp.text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
