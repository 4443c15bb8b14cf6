pub mod market_rate;
pub mod raw_rate;
