pub mod diagnostics;
pub mod page_fetcher;
pub mod rate_cache;
pub mod rate_parser;
pub mod translator;
