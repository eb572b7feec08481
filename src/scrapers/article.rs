//! HTTP fetching of a single article page.

use super::ArticleExtractor;
use super::metadata::parse_article;
use crate::error::DigestError;
use crate::models::ArticleRecord;
use reqwest::Client;
use std::time::Instant;
use tracing::{info, instrument};
use url::Url;

/// [`ArticleExtractor`] that downloads the page with `reqwest` and parses it
/// with `scraper`.
#[derive(Debug, Clone)]
pub struct WebExtractor {
    client: Client,
}

impl WebExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build an extractor with its own client sending `user_agent`.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, DigestError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self::new(client))
    }
}

impl ArticleExtractor for WebExtractor {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn extract(&self, url: &str) -> Result<ArticleRecord, DigestError> {
        let t0 = Instant::now();
        let parsed = Url::parse(url).map_err(|e| DigestError::Extraction(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DigestError::Extraction(format!(
                "{url}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DigestError::Extraction(format!("{url}: HTTP {status}")));
        }
        let html = response.text().await?;

        let record = parse_article(&html);
        info!(
            bytes = html.len(),
            body_chars = record.body.len(),
            hints = record.keyword_hints.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Parsed article"
        );
        Ok(record)
    }
}
