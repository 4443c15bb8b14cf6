//! APMC rate table locator and row parser.
//!
//! The rate pages carry several unrelated tables (navigation, notices,
//! layout). The rate table is recognised by its header row, then every
//! following row with enough cells becomes a [`RawRate`]. Blank or
//! malformed rows are routine in this markup and are dropped silently.

use crate::domain::entities::raw_rate::{midpoint, RawRate};
use crate::domain::ports::rate_parser::RateParser;
use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Rows with fewer `td` cells than this are skipped.
pub const MIN_CELLS: usize = 5;

/// Zero-based cell positions of each field in a rate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub label: usize,
    pub arrival: usize,
    pub min: usize,
    pub max: usize,
    /// Cell holding a published modal rate. When the cell is missing or
    /// yields zero the modal rate is the rounded min/max midpoint.
    pub modal: Option<usize>,
}

impl ColumnLayout {
    /// Leading serial-number column: `# | commodity | arrival | min | max [| modal]`.
    pub const SERIAL: ColumnLayout = ColumnLayout {
        label: 1,
        arrival: 2,
        min: 3,
        max: 4,
        modal: Some(5),
    };

    /// No serial column: `commodity | arrival | min | max | modal`.
    pub const PLAIN: ColumnLayout = ColumnLayout {
        label: 0,
        arrival: 1,
        min: 2,
        max: 3,
        modal: Some(4),
    };
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout::SERIAL
    }
}

impl fmt::Display for ColumnLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == ColumnLayout::SERIAL {
            write!(f, "serial")
        } else if *self == ColumnLayout::PLAIN {
            write!(f, "plain")
        } else {
            write!(
                f,
                "custom(label={}, arrival={}, min={}, max={}, modal={:?})",
                self.label, self.arrival, self.min, self.max, self.modal
            )
        }
    }
}

impl FromStr for ColumnLayout {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "serial" => Ok(ColumnLayout::SERIAL),
            "plain" => Ok(ColumnLayout::PLAIN),
            _ => Err(format!("Unknown column layout: {s} (expected serial or plain)")),
        }
    }
}

/// One way of recognising the rate table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMatcher {
    /// The table's first row, lowercased, contains any of these keywords.
    HeaderKeywords(Vec<String>),
    /// The `<table>` element carries this class.
    CssClass(String),
}

impl TableMatcher {
    pub fn header_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        TableMatcher::HeaderKeywords(
            keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        )
    }

    fn matches(&self, table: ElementRef<'_>) -> bool {
        match self {
            TableMatcher::HeaderKeywords(keywords) => match rows(table).next() {
                Some(header) => {
                    let text = header.text().collect::<String>().to_lowercase();
                    keywords.iter().any(|k| text.contains(k.as_str()))
                }
                None => false,
            },
            TableMatcher::CssClass(class) => table.value().classes().any(|c| c == class),
        }
    }
}

/// Header keywords of the Pune APMC rate table, in Marathi and English.
pub fn default_matchers() -> Vec<TableMatcher> {
    vec![
        TableMatcher::header_keywords(["शेतिमाल", "आवक", "किमान", "कमाल"]),
        TableMatcher::header_keywords([
            "commodity",
            "arrival",
            "min price",
            "max price",
            "minimum",
            "maximum",
        ]),
    ]
}

/// Finds the rate table in a page and turns its rows into [`RawRate`]s.
#[derive(Debug, Clone)]
pub struct RateTableParser {
    matchers: Vec<TableMatcher>,
    layout: ColumnLayout,
}

impl Default for RateTableParser {
    fn default() -> Self {
        Self::new(ColumnLayout::default())
    }
}

impl RateTableParser {
    pub fn new(layout: ColumnLayout) -> Self {
        Self::with_matchers(default_matchers(), layout)
    }

    pub fn with_matchers(matchers: Vec<TableMatcher>, layout: ColumnLayout) -> Self {
        Self { matchers, layout }
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Parse every usable row of the first matching table, stamped with `date`.
    ///
    /// Returns an empty list when no table matches. Callers treat that as a
    /// failed source, not as an error.
    pub fn parse(&self, html: &str, date: NaiveDate) -> Vec<RawRate> {
        let document = Html::parse_document(html);
        let Some(table) = self.locate(&document) else {
            debug!("no rate table found");
            return Vec::new();
        };

        let rates: Vec<RawRate> = rows(table)
            .skip(1)
            .filter_map(|row| self.parse_row(row, date))
            .collect();
        debug!(rows = rates.len(), layout = %self.layout, "parsed rate table");
        rates
    }

    fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        elements(document.root_element(), "table")
            .find(|table| self.matchers.iter().any(|m| m.matches(*table)))
    }

    fn parse_row(&self, row: ElementRef<'_>, date: NaiveDate) -> Option<RawRate> {
        let cells: Vec<String> = elements(row, "td")
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < MIN_CELLS {
            return None;
        }

        let number = |idx: usize| cells.get(idx).map(|c| extract_number(c)).unwrap_or(0);
        let label = cells.get(self.layout.label)?.clone();
        let min_rate = number(self.layout.min);
        let max_rate = number(self.layout.max);
        let modal_rate = match self.layout.modal.map(number) {
            Some(published) if published > 0 => published,
            _ => midpoint(min_rate, max_rate),
        };

        let rate = RawRate {
            commodity_label: label,
            arrival: number(self.layout.arrival),
            min_rate,
            max_rate,
            modal_rate,
            date,
        };
        rate.has_price().then_some(rate)
    }
}

impl RateParser for RateTableParser {
    fn parse(&self, html: &str, date: NaiveDate) -> Vec<RawRate> {
        RateTableParser::parse(self, html, date)
    }
}

fn elements<'a>(
    scope: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |e| e.value().name() == name)
}

fn rows(table: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    elements(table, "tr")
}

/// Value of the first run of ASCII digits in `text`, or 0 when there is none.
///
/// Decorations around the number are ignored (`"Rs. 600/-"` is 600). Thousands
/// separators are not stripped, so `"1,234"` reads as 1.
pub fn extract_number(text: &str) -> u64 {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}
