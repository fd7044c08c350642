//! Remote dataset retrieval.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info_span, Instrument};

use crate::error::FetchError;

/// Anything that can produce the raw dataset CSV text.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable origin used in logs and reports.
    fn describe(&self) -> String;

    async fn fetch_text(&self) -> Result<String, FetchError>;
}

/// Single GET against a fixed CSV URL. No retries and no caching.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_text(&self) -> Result<String, FetchError> {
        let span = info_span!("dataset_fetch", url = %self.url);
        async {
            let resp = self.client.get(&self.url).send().await?;

            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Transport {
                    status: status.as_u16(),
                    url: self.url.clone(),
                });
            }

            let body = resp.text().await?;
            debug!(bytes = body.len(), "dataset body received");
            Ok::<_, FetchError>(body)
        }
        .instrument(span)
        .await
    }
}
