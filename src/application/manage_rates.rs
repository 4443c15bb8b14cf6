//! Manual corrections to the stored rate set.

use crate::domain::entities::market_rate::{PredictedRate, RateUpdate, StoredRate};
use crate::domain::error::DomainError;
use crate::domain::ports::rate_cache::RateCache;
use std::sync::Arc;
use tracing::info;

pub struct ManageRatesUseCase {
    cache: Arc<dyn RateCache>,
}

impl ManageRatesUseCase {
    pub fn new(cache: Arc<dyn RateCache>) -> Self {
        Self { cache }
    }

    pub fn add(&self, rate: PredictedRate) -> Result<StoredRate, DomainError> {
        validate(&rate)?;
        let stored = self.cache.insert(&rate)?;
        info!(id = %stored.id, commodity = %stored.rate.commodity, "added rate");
        Ok(stored)
    }

    pub fn update(&self, id: &str, update: RateUpdate) -> Result<StoredRate, DomainError> {
        if update.is_empty() {
            return Err(DomainError::InvalidInput("update has no fields".into()));
        }
        if update.commodity.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(DomainError::InvalidInput("commodity must not be empty".into()));
        }
        let stored = self.cache.update(id, &update)?;
        info!(id, commodity = %stored.rate.commodity, "updated rate");
        Ok(stored)
    }
}

fn validate(rate: &PredictedRate) -> Result<(), DomainError> {
    if rate.commodity.trim().is_empty() {
        return Err(DomainError::InvalidInput("commodity must not be empty".into()));
    }
    if rate.min > rate.max {
        return Err(DomainError::InvalidInput(format!(
            "min {} exceeds max {}",
            rate.min, rate.max
        )));
    }
    Ok(())
}
