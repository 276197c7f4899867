use async_trait::async_trait;
use bytes::Bytes;
use ferrous_failover_application::ports::CandidateFeed;
use ferrous_failover_domain::config::FeedConfig;
use ferrous_failover_domain::{CandidateSource, DomainError, FeedEntry};
use std::time::Duration;
use tracing::{debug, info};

use super::archive;

/// Downloads candidate lists over HTTP. The body is either a zip archive
/// of `id-tls-port.txt` lists or a single plain-text list.
pub struct HttpCandidateFeed {
    http_client: reqwest::Client,
    url: String,
    default_source: CandidateSource,
}

impl HttpCandidateFeed {
    pub fn new(config: &FeedConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("Ferrous-Failover/", env!("CARGO_PKG_VERSION"), " (feed)"))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: config.url.clone(),
            default_source: CandidateSource::new("default", config.default_tls, config.default_port),
        })
    }

    async fn download(&self) -> Result<Bytes, DomainError> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DomainError::FeedUnavailable(format!("{}: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::FeedUnavailable(format!(
                "HTTP {} for {}",
                response.status().as_u16(),
                self.url
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| DomainError::FeedUnavailable(format!("{}: {}", self.url, e)))
    }
}

#[async_trait]
impl CandidateFeed for HttpCandidateFeed {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, DomainError> {
        let body = self.download().await?;
        debug!(url = %self.url, bytes = body.len(), "Candidate feed downloaded");

        if !archive::is_zip(&body) {
            let content = String::from_utf8_lossy(&body).into_owned();
            return Ok(vec![FeedEntry::new(self.default_source.clone(), content)]);
        }

        let entries = tokio::task::spawn_blocking(move || archive::read_entries(&body))
            .await
            .map_err(|e| DomainError::FeedArchive(e.to_string()))??;

        info!(url = %self.url, entries = entries.len(), "Candidate archive unpacked");
        Ok(entries)
    }
}
