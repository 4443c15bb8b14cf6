use crate::domain::error::DomainError;
use crate::domain::ports::page_fetcher::PageFetcher;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use std::time::Duration;
use tracing::debug;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

const ACCEPT_LANGUAGES: &str = "en-US,en;q=0.9,hi;q=0.8,en-IN;q=0.7";

/// Plain HTTP GET of the APMC pages with browser-like headers.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGES));
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Network(format!("GET {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DomainError::Network(format!("GET {url} returned {status}")));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| DomainError::Network(format!("Reading {url}: {e}")))?;
        debug!(url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let fetcher = HttpPageFetcher::new(Duration::from_secs(2)).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/rates.aspx").await.unwrap_err();
        assert!(matches!(err, DomainError::Network(_)));
    }
}
