use crate::domain::entities::market_rate::{PredictedRate, RateUpdate, StoredRate};
use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};

/// Store of the most recent predicted rate set.
pub trait RateCache: Send + Sync {
    /// Rows inserted at or after `since`, ordered by commodity name.
    fn fresh_since(&self, since: DateTime<Utc>) -> Result<Vec<PredictedRate>, DomainError>;

    /// Replaces the whole stored set with `rates`.
    fn replace_all(&self, rates: &[PredictedRate]) -> Result<(), DomainError>;

    /// Adds one rate alongside the stored set, stamped as fresh.
    fn insert(&self, rate: &PredictedRate) -> Result<StoredRate, DomainError>;

    /// Applies `update` to the row with `id`. `NotFound` when no such row.
    fn update(&self, id: &str, update: &RateUpdate) -> Result<StoredRate, DomainError>;
}
