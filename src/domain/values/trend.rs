//! Supply/price trend heuristic.
//!
//! Compares the current session against a baseline session for the same
//! commodity and classifies the expected modal price move:
//!
//! 1. Supply up while the price is already falling: `Decrease`.
//! 2. Supply down while the price is already rising: `Increase`.
//! 3. Otherwise project the price move from the relative supply change with a
//!    fixed elasticity of `-0.5`, and call anything beyond ±2% of the current
//!    modal price a move.
//!
//! Without a usable baseline the absolute arrival volume decides: heavy
//! arrivals push prices down, thin arrivals push them up.
//!
//! Everything here is pure; the same inputs always give the same outcome.

use crate::domain::entities::raw_rate::RawRate;
use crate::domain::values::prediction::Prediction;
use serde::Serialize;

/// Arrivals above this volume (quintals) predict a falling price.
pub const HIGH_ARRIVAL: u64 = 10_000;
/// Arrivals below this volume (quintals) predict a rising price.
pub const LOW_ARRIVAL: u64 = 1_000;
/// Price elasticity of supply for perishable produce.
pub const SUPPLY_ELASTICITY: f64 = -0.5;
/// Projected moves within this fraction of the modal price are `Stable`.
pub const STABLE_BAND: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendOutcome {
    pub prediction: Prediction,
    /// Baseline modal rate the prediction was compared against.
    /// `None` when the arrival heuristic decided.
    pub previous_modal: Option<u64>,
}

/// Classify the expected price move for `current` against `historical`.
pub fn predict(current: &RawRate, historical: Option<&RawRate>) -> TrendOutcome {
    let Some(historical) = historical else {
        return by_arrival(current);
    };

    let supply_change = current.arrival as f64 - historical.arrival as f64;
    let price_change = current.modal_rate as f64 - historical.modal_rate as f64;
    let compared = |prediction| TrendOutcome {
        prediction,
        previous_modal: Some(historical.modal_rate),
    };

    if supply_change > 0.0 && price_change < 0.0 {
        return compared(Prediction::Decrease);
    }
    if supply_change < 0.0 && price_change > 0.0 {
        return compared(Prediction::Increase);
    }

    // A zero-arrival baseline has no relative supply change to project from.
    if historical.arrival == 0 {
        return by_arrival(current);
    }

    let modal = current.modal_rate as f64;
    let projected = (supply_change / historical.arrival as f64) * SUPPLY_ELASTICITY * modal;
    let band = STABLE_BAND * modal;

    if projected > band {
        compared(Prediction::Increase)
    } else if projected < -band {
        compared(Prediction::Decrease)
    } else {
        compared(Prediction::Stable)
    }
}

fn by_arrival(current: &RawRate) -> TrendOutcome {
    let prediction = if current.arrival > HIGH_ARRIVAL {
        Prediction::Decrease
    } else if current.arrival < LOW_ARRIVAL {
        Prediction::Increase
    } else {
        Prediction::Stable
    };
    TrendOutcome {
        prediction,
        previous_modal: None,
    }
}
