pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod http;
pub mod infrastructure;

use crate::application::dictionary::CommodityDictionary;
use crate::application::manage_rates::ManageRatesUseCase;
use crate::application::market_rates::{MarketRatesUseCase, RateSources};
use crate::config::{Settings, TranslatorKind};
use crate::domain::entities::market_rate::{PredictedRate, RateUpdate, StoredRate};
use crate::domain::entities::raw_rate::RawRate;
use crate::domain::error::DomainError;
use crate::domain::ports::diagnostics::DiagnosticsSink;
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::domain::ports::rate_cache::RateCache;
use crate::domain::ports::rate_parser::RateParser;
use crate::domain::ports::translator::Translator;
use crate::domain::values::language::{CommodityName, LanguageForm};
use crate::infrastructure::apmc::fetcher::HttpPageFetcher;
use crate::infrastructure::apmc::table::RateTableParser;
use crate::infrastructure::diagnostics::TracingDiagnostics;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::rate_cache::SqliteRateCache;
use crate::infrastructure::translation::google::GoogleTranslator;
use chrono::Utc;
use rusqlite::Connection;
use std::sync::Arc;

/// Adapters that reach outside the process.
pub struct Providers {
    pub fetcher: Arc<dyn PageFetcher>,
    pub translator: Option<Arc<dyn Translator>>,
    pub diagnostics: Arc<dyn DiagnosticsSink>,
}

pub struct KrushiPravah {
    market_rates_uc: MarketRatesUseCase,
    manage_rates_uc: ManageRatesUseCase,
    dictionary: Arc<CommodityDictionary>,
    parser: Arc<dyn RateParser>,
}

impl KrushiPravah {
    pub fn new(settings: &Settings) -> Result<Self, DomainError> {
        let translator: Option<Arc<dyn Translator>> = match settings.translator {
            TranslatorKind::Google => Some(Arc::new(GoogleTranslator::new(
                settings.translate_url.clone(),
                settings.http_timeout,
            )?)),
            TranslatorKind::None => None,
        };

        Self::with_providers(
            settings,
            Providers {
                fetcher: Arc::new(HttpPageFetcher::new(settings.http_timeout)?),
                translator,
                diagnostics: Arc::new(TracingDiagnostics),
            },
        )
    }

    pub fn with_providers(settings: &Settings, providers: Providers) -> Result<Self, DomainError> {
        let conn = Connection::open(&settings.db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        let cache: Arc<dyn RateCache> = Arc::new(SqliteRateCache::new(conn));
        let parser: Arc<dyn RateParser> = Arc::new(RateTableParser::new(settings.layout));
        let dictionary = Arc::new(CommodityDictionary::new(
            providers.translator,
            providers.diagnostics.clone(),
        ));

        let sources = RateSources {
            current_url: settings.rates_url.clone(),
            historical_url: settings.history_url.clone(),
            label_form: LanguageForm::Secondary,
        };
        let freshness = chrono::Duration::hours(i64::from(settings.cache_hours));

        Ok(Self {
            market_rates_uc: MarketRatesUseCase::new(
                providers.fetcher,
                parser.clone(),
                dictionary.clone(),
                providers.diagnostics,
                sources,
            )
            .with_cache(cache.clone(), freshness),
            manage_rates_uc: ManageRatesUseCase::new(cache),
            dictionary,
            parser,
        })
    }

    /// Rates through the full fallback chain; always renderable.
    pub async fn current_rates(&self) -> Vec<PredictedRate> {
        self.market_rates_uc.current_rates().await
    }

    /// Rates from the live page only, without cache or mock substitution.
    pub async fn live_rates(&self) -> Result<Vec<PredictedRate>, DomainError> {
        self.market_rates_uc.live_rates().await
    }

    pub fn cached_rates(&self) -> Result<Vec<PredictedRate>, DomainError> {
        self.market_rates_uc.cached_rates()
    }

    pub async fn mock_rates(&self) -> Vec<PredictedRate> {
        self.market_rates_uc.mock_rates().await
    }

    /// Store a hand-entered rate next to the scraped set.
    pub fn add_rate(&self, rate: PredictedRate) -> Result<StoredRate, DomainError> {
        self.manage_rates_uc.add(rate)
    }

    pub fn update_rate(&self, id: &str, update: RateUpdate) -> Result<StoredRate, DomainError> {
        self.manage_rates_uc.update(id, update)
    }

    pub async fn resolve(&self, label: &str, form: LanguageForm) -> CommodityName {
        self.dictionary.resolve(label, form).await
    }

    /// Parse a saved rate page, stamped with today's date.
    pub fn parse_page(&self, html: &str) -> Vec<RawRate> {
        self.parser.parse(html, Utc::now().date_naive())
    }
}
