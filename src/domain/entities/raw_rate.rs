use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of an APMC rate table, before the commodity name is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRate {
    /// Commodity text exactly as it appeared in the source.
    pub commodity_label: String,
    /// Arrival volume in quintals.
    pub arrival: u64,
    pub min_rate: u64,
    pub max_rate: u64,
    pub modal_rate: u64,
    pub date: NaiveDate,
}

impl RawRate {
    /// Builds a rate whose modal price is the rounded midpoint of min and max.
    pub fn with_midpoint(
        commodity_label: impl Into<String>,
        arrival: u64,
        min_rate: u64,
        max_rate: u64,
        date: NaiveDate,
    ) -> Self {
        Self {
            commodity_label: commodity_label.into(),
            arrival,
            min_rate,
            max_rate,
            modal_rate: midpoint(min_rate, max_rate),
            date,
        }
    }

    /// A zero modal rate carries no price information and is dropped.
    pub fn has_price(&self) -> bool {
        self.modal_rate > 0
    }
}

/// `round((min + max) / 2)`, halves rounding up.
pub fn midpoint(min: u64, max: u64) -> u64 {
    let sum = min.saturating_add(max);
    sum / 2 + sum % 2
}
