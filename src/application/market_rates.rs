//! Market rates pipeline.
//!
//! cache → live page → names → historical baseline → predictions → cache.
//!
//! Every step degrades rather than aborting: a dead historical page falls
//! back to the built-in baseline, and a dead current page falls back to the
//! built-in mock dataset. Each degradation is reported to the diagnostics
//! sink.

use crate::application::dictionary::CommodityDictionary;
use crate::application::fallback_data::{baseline_rates, mock_current_rates};
use crate::domain::entities::market_rate::{PredictedRate, ResolvedRate};
use crate::domain::entities::raw_rate::RawRate;
use crate::domain::error::DomainError;
use crate::domain::ports::diagnostics::{DiagnosticsSink, FallbackEvent, FallbackKind};
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::domain::ports::rate_cache::RateCache;
use crate::domain::ports::rate_parser::RateParser;
use crate::domain::values::language::LanguageForm;
use crate::domain::values::trend::predict;
use chrono::{Duration, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The history page publishes the session one week before today.
pub const HISTORY_LOOKBACK_DAYS: i64 = 7;

/// Where the live rate pages live and which language their labels use.
#[derive(Debug, Clone)]
pub struct RateSources {
    pub current_url: String,
    pub historical_url: String,
    pub label_form: LanguageForm,
}

pub struct MarketRatesUseCase {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn RateParser>,
    dictionary: Arc<CommodityDictionary>,
    cache: Option<Arc<dyn RateCache>>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    sources: RateSources,
    freshness: Option<Duration>,
}

impl MarketRatesUseCase {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        parser: Arc<dyn RateParser>,
        dictionary: Arc<CommodityDictionary>,
        diagnostics: Arc<dyn DiagnosticsSink>,
        sources: RateSources,
    ) -> Self {
        Self {
            fetcher,
            parser,
            dictionary,
            cache: None,
            diagnostics,
            sources,
            freshness: None,
        }
    }

    /// Serve cached sets younger than `freshness` and store every live set.
    pub fn with_cache(mut self, cache: Arc<dyn RateCache>, freshness: Duration) -> Self {
        self.cache = Some(cache);
        self.freshness = (freshness > Duration::zero()).then_some(freshness);
        self
    }

    /// Current predicted rates through the full fallback chain.
    ///
    /// Never fails: when the live page is unusable the built-in mock dataset
    /// is returned instead.
    pub async fn current_rates(&self) -> Vec<PredictedRate> {
        if let Some(rates) = self.read_cache() {
            info!(count = rates.len(), "serving cached rates");
            return rates;
        }

        match self.live_rates().await {
            Ok(rates) => {
                self.write_cache(&rates);
                rates
            }
            Err(e) => {
                let kind = match e {
                    DomainError::NotFound(_) => FallbackKind::LiveEmpty,
                    _ => FallbackKind::LiveFetch,
                };
                self.report(kind, e.to_string());
                self.report(FallbackKind::MockDataset, "live rates unavailable");
                self.mock_rates().await
            }
        }
    }

    /// Current predicted rates from the live page only.
    ///
    /// Skips the cache and never substitutes mock data; the historical
    /// baseline still falls back to the built-in set.
    pub async fn live_rates(&self) -> Result<Vec<PredictedRate>, DomainError> {
        let today = Utc::now().date_naive();
        let html = self.fetcher.fetch(&self.sources.current_url).await?;
        let current = self.parser.parse(&html, today);
        if current.is_empty() {
            return Err(DomainError::NotFound(format!(
                "no rate table at {}",
                self.sources.current_url
            )));
        }
        info!(rows = current.len(), "parsed live rates");

        let historical = self.historical_rates().await;
        Ok(self
            .predict_all(current, self.sources.label_form, &historical)
            .await)
    }

    /// Whatever the cache holds within the freshness horizon.
    pub fn cached_rates(&self) -> Result<Vec<PredictedRate>, DomainError> {
        match (&self.cache, self.freshness) {
            (Some(cache), Some(freshness)) => cache.fresh_since(Utc::now() - freshness),
            _ => Ok(Vec::new()),
        }
    }

    /// Predictions for the built-in mock session against the built-in baseline.
    pub async fn mock_rates(&self) -> Vec<PredictedRate> {
        self.predict_all(mock_current_rates(), LanguageForm::Primary, &baseline_rates())
            .await
    }

    /// Baseline rows from the history page, dated one lookback period ago.
    /// Falls back to the built-in baseline when the page is unusable.
    pub async fn historical_rates(&self) -> Vec<RawRate> {
        let as_of = Utc::now().date_naive() - Duration::days(HISTORY_LOOKBACK_DAYS);
        match self.fetcher.fetch(&self.sources.historical_url).await {
            Ok(html) => {
                let rates = self.parser.parse(&html, as_of);
                if rates.is_empty() {
                    self.report(
                        FallbackKind::HistoricalEmpty,
                        format!("no rate table at {}", self.sources.historical_url),
                    );
                    baseline_rates()
                } else {
                    debug!(rows = rates.len(), "parsed historical rates");
                    rates
                }
            }
            Err(e) => {
                self.report(FallbackKind::HistoricalFetch, e.to_string());
                baseline_rates()
            }
        }
    }

    /// Resolve names, predict against `historical`, drop repeated commodities
    /// and sort by display name, ignoring case.
    async fn predict_all(
        &self,
        current: Vec<RawRate>,
        form: LanguageForm,
        historical: &[RawRate],
    ) -> Vec<PredictedRate> {
        let mut seen = HashSet::new();
        let mut predicted = Vec::with_capacity(current.len());

        for rate in current {
            let name = self.dictionary.resolve(&rate.commodity_label, form).await;
            if !seen.insert((name.primary.clone(), name.secondary.clone())) {
                debug!(commodity = %name.primary, "dropping repeated row");
                continue;
            }
            let baseline = historical
                .iter()
                .find(|h| name.matches(&h.commodity_label));
            let outcome = predict(&rate, baseline);
            predicted.push(PredictedRate::new(ResolvedRate::new(name, rate), outcome));
        }

        predicted.sort_by_key(|r| r.commodity.to_lowercase());
        predicted
    }

    fn read_cache(&self) -> Option<Vec<PredictedRate>> {
        self.freshness?;
        match self.cached_rates() {
            Ok(rates) if !rates.is_empty() => Some(rates),
            Ok(_) => None,
            Err(e) => {
                self.report(FallbackKind::CacheRead, e.to_string());
                None
            }
        }
    }

    fn write_cache(&self, rates: &[PredictedRate]) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(e) = cache.replace_all(rates) {
            warn!(error = %e, "could not store rates");
            self.report(FallbackKind::CacheWrite, e.to_string());
        }
    }

    fn report(&self, kind: FallbackKind, cause: impl Into<String>) {
        self.diagnostics.record(FallbackEvent::new(kind, cause));
    }
}
