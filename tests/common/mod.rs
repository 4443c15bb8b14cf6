//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use krushi_pravah::config::{Settings, TranslatorKind};
use krushi_pravah::domain::error::DomainError;
use krushi_pravah::domain::ports::page_fetcher::PageFetcher;
use krushi_pravah::domain::ports::translator::Translator;
use krushi_pravah::infrastructure::diagnostics::MemoryDiagnostics;
use krushi_pravah::{KrushiPravah, Providers};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const RATES_URL: &str = "http://apmc.test/rates.aspx";
pub const HISTORY_URL: &str = "http://apmc.test/history.aspx?id=Rates4315";

pub const CURRENT_PAGE: &str = r#"<html><body>
<table class="nav"><tr><td><a href="/">मुख्यपृष्ठ</a></td><td><a href="/rates.aspx">बाजारभाव</a></td></tr></table>
<table class="data">
  <tr><th>अ.क्र.</th><th>शेतिमाल</th><th>आवक</th><th>किमान</th><th>कमाल</th></tr>
  <tr><td>1</td><td>टोमॅटो</td><td>9500</td><td>Rs. 1000/-</td><td>Rs. 2500/-</td></tr>
  <tr><td>2</td><td>कांदा</td><td>12000</td><td>1200</td><td>2000</td></tr>
  <tr><td>3</td><td>बटाटा</td><td>15000</td><td>800</td><td>1500</td></tr>
  <tr><td>4</td><td>अळू</td><td>300</td><td>2000</td><td>3000</td></tr>
  <tr><td>5</td><td>लसूण</td><td>400</td><td>-</td><td>-</td></tr>
  <tr><td>6</td><td>कांदा</td><td>12000</td><td>1200</td><td>2000</td></tr>
</table>
<table><tr><td>© Pune APMC</td></tr></table>
</body></html>"#;

pub const HISTORY_PAGE: &str = r#"<html><body>
<table>
  <tr><td>अ.क्र.</td><td>शेतिमाल</td><td>आवक</td><td>किमान</td><td>कमाल</td></tr>
  <tr><td>1</td><td>टोमॅटो</td><td>8500</td><td>1200</td><td>2700</td></tr>
  <tr><td>2</td><td>कांदा</td><td>15000</td><td>1300</td><td>2100</td></tr>
</table>
</body></html>"#;

pub const NO_TABLE_PAGE: &str = "<html><body><p>Server maintenance</p></body></html>";

/// Serves canned pages by URL and counts requests.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(html.to_string()));
        self
    }

    pub fn failing(mut self, url: &str, reason: &str) -> Self {
        self.pages.insert(url.to_string(), Err(reason.to_string()));
        self
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(reason)) => Err(DomainError::Network(reason.clone())),
            None => Err(DomainError::Network(format!("connection refused: {url}"))),
        }
    }
}

/// Knows a fixed set of translations and counts every call.
pub struct FakeTranslator {
    known: HashMap<String, String>,
    pub calls: AtomicUsize,
}

impl FakeTranslator {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            known: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    fn name(&self) -> &str {
        "fake"
    }

    async fn translate(&self, text: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.known
            .get(text)
            .cloned()
            .ok_or_else(|| DomainError::Translation(format!("no translation for {text}")))
    }
}

pub fn settings(cache_hours: u32) -> Settings {
    Settings {
        db_path: ":memory:".into(),
        rates_url: RATES_URL.into(),
        history_url: HISTORY_URL.into(),
        cache_hours,
        translator: TranslatorKind::None,
        ..Settings::default()
    }
}

pub struct Harness {
    pub app: KrushiPravah,
    pub fetcher: Arc<FakeFetcher>,
    pub translator: Arc<FakeTranslator>,
    pub diagnostics: Arc<MemoryDiagnostics>,
}

pub fn setup(fetcher: FakeFetcher, cache_hours: u32) -> Harness {
    setup_with(fetcher, FakeTranslator::new(&[("अळू", "Colocasia")]), cache_hours)
}

pub fn setup_with(fetcher: FakeFetcher, translator: FakeTranslator, cache_hours: u32) -> Harness {
    let fetcher = Arc::new(fetcher);
    let translator = Arc::new(translator);
    let diagnostics = Arc::new(MemoryDiagnostics::new());
    let app = KrushiPravah::with_providers(
        &settings(cache_hours),
        Providers {
            fetcher: fetcher.clone(),
            translator: Some(translator.clone()),
            diagnostics: diagnostics.clone(),
        },
    )
    .unwrap();
    Harness {
        app,
        fetcher,
        translator,
        diagnostics,
    }
}

pub fn live_site() -> FakeFetcher {
    FakeFetcher::new()
        .page(RATES_URL, CURRENT_PAGE)
        .page(HISTORY_URL, HISTORY_PAGE)
}
