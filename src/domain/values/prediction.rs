use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Expected direction of the modal price in the next session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Increase,
    Decrease,
    Stable,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Increase => write!(f, "increase"),
            Prediction::Decrease => write!(f, "decrease"),
            Prediction::Stable => write!(f, "stable"),
        }
    }
}

impl FromStr for Prediction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "increase" => Ok(Prediction::Increase),
            "decrease" => Ok(Prediction::Decrease),
            "stable" => Ok(Prediction::Stable),
            _ => Err(format!("Unknown prediction: {s}")),
        }
    }
}
