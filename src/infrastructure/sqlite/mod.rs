pub mod migrations;
pub mod rate_cache;
