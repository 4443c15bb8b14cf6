//! Built-in rate sets used when the APMC site is unavailable.
//!
//! Labels are English (`LanguageForm::Primary`).

use crate::domain::entities::raw_rate::RawRate;
use chrono::NaiveDate;

type Row = (&'static str, u64, u64, u64, u64);

const MOCK_CURRENT: &[Row] = &[
    ("Tomato", 9500, 1000, 2500, 1800),
    ("Potato", 15000, 800, 1500, 1200),
    ("Onion", 12000, 1200, 2000, 1700),
    ("Lady Finger", 1500, 2000, 3500, 2800),
    ("Cauliflower", 3000, 1500, 2500, 2000),
    ("Cabbage", 10000, 800, 1200, 1000),
    ("Brinjal", 4000, 1800, 2800, 2200),
    ("Cucumber", 7000, 1200, 1800, 1500),
    ("Carrot", 3500, 1500, 2200, 1800),
    ("Spinach", 2000, 1000, 1800, 1400),
];

const BASELINE: &[Row] = &[
    ("Tomato", 8500, 1200, 2700, 2000),
    ("Potato", 12000, 750, 1400, 1100),
    ("Onion", 15000, 1300, 2100, 1800),
    ("Lady Finger", 2000, 2200, 3700, 3000),
    ("Cauliflower", 3500, 1600, 2600, 2100),
    ("Cabbage", 9000, 750, 1100, 950),
    ("Brinjal", 4500, 1900, 2900, 2300),
    ("Cucumber", 6000, 1100, 1700, 1400),
    ("Carrot", 4000, 1600, 2300, 1900),
    ("Spinach", 2500, 950, 1700, 1300),
];

fn build(rows: &[Row], date: NaiveDate) -> Vec<RawRate> {
    rows.iter()
        .map(|&(label, arrival, min, max, modal)| RawRate {
            commodity_label: label.to_string(),
            arrival,
            min_rate: min,
            max_rate: max,
            modal_rate: modal,
            date,
        })
        .collect()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Ten representative commodities standing in for a live session.
pub fn mock_current_rates() -> Vec<RawRate> {
    build(MOCK_CURRENT, day(2025, 4, 12))
}

/// The same commodities one week earlier.
pub fn baseline_rates() -> Vec<RawRate> {
    build(BASELINE, day(2025, 4, 5))
}
