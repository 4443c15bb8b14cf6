pub mod dictionary;
pub mod fallback_data;
pub mod manage_rates;
pub mod market_rates;
