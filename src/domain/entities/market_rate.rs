use crate::domain::entities::raw_rate::RawRate;
use crate::domain::values::language::CommodityName;
use crate::domain::values::prediction::Prediction;
use crate::domain::values::trend::TrendOutcome;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// APMC rates are quoted per quintal.
pub const RATE_UNIT: &str = "Quintal";

/// A parsed rate with both renderings of its commodity name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRate {
    pub name: CommodityName,
    pub rate: RawRate,
}

impl ResolvedRate {
    pub fn new(name: CommodityName, rate: RawRate) -> Self {
        Self { name, rate }
    }
}

/// A resolved rate with its trend prediction. This is the shape served to
/// the presentation layer and stored in the rate cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedRate {
    pub commodity: String,
    pub commodity_marathi: String,
    pub arrival: u64,
    #[serde(alias = "minRate")]
    pub min: u64,
    #[serde(alias = "maxRate")]
    pub max: u64,
    #[serde(alias = "modalRate")]
    pub modal: u64,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub date: NaiveDate,
    pub prediction: Prediction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_modal: Option<u64>,
}

fn default_unit() -> String {
    RATE_UNIT.to_string()
}

impl PredictedRate {
    pub fn new(resolved: ResolvedRate, outcome: TrendOutcome) -> Self {
        let ResolvedRate { name, rate } = resolved;
        Self {
            commodity: name.primary,
            commodity_marathi: name.secondary,
            arrival: rate.arrival,
            min: rate.min_rate,
            max: rate.max_rate,
            modal: rate.modal_rate,
            unit: default_unit(),
            date: rate.date,
            prediction: outcome.prediction,
            previous_modal: outcome.previous_modal,
        }
    }
}

/// A predicted rate as held in the rate store, keyed by its row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRate {
    pub id: String,
    #[serde(flatten)]
    pub rate: PredictedRate,
}

/// Partial edit of a stored rate. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RateUpdate {
    pub commodity: Option<String>,
    pub commodity_marathi: Option<String>,
    pub arrival: Option<u64>,
    #[serde(alias = "minRate")]
    pub min: Option<u64>,
    #[serde(alias = "maxRate")]
    pub max: Option<u64>,
    #[serde(alias = "modalRate")]
    pub modal: Option<u64>,
    pub date: Option<NaiveDate>,
    pub prediction: Option<Prediction>,
    pub previous_modal: Option<u64>,
}

impl RateUpdate {
    pub fn is_empty(&self) -> bool {
        *self == RateUpdate::default()
    }

    pub fn apply(&self, rate: &mut PredictedRate) {
        if let Some(v) = &self.commodity {
            rate.commodity = v.clone();
        }
        if let Some(v) = &self.commodity_marathi {
            rate.commodity_marathi = v.clone();
        }
        if let Some(v) = self.arrival {
            rate.arrival = v;
        }
        if let Some(v) = self.min {
            rate.min = v;
        }
        if let Some(v) = self.max {
            rate.max = v;
        }
        if let Some(v) = self.modal {
            rate.modal = v;
        }
        if let Some(v) = self.date {
            rate.date = v;
        }
        if let Some(v) = self.prediction {
            rate.prediction = v;
        }
        if self.previous_modal.is_some() {
            rate.previous_modal = self.previous_modal;
        }
    }
}
