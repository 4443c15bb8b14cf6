pub mod language;
pub mod prediction;
pub mod trend;
