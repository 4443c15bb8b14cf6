use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Remote translation of a commodity label from the local language into the
/// display language.
///
/// Implementations return `Err` on any failure, including an empty or
/// malformed response. Callers decide how to degrade.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Name of this translator for logging.
    fn name(&self) -> &str;

    async fn translate(&self, text: &str) -> Result<String, DomainError>;
}
