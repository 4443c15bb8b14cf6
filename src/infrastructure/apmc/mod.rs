pub mod fetcher;
pub mod table;
