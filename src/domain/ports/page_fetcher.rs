use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Retrieves the raw HTML of a rate page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, DomainError>;
}
