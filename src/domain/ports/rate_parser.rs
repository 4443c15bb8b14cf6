use crate::domain::entities::raw_rate::RawRate;
use chrono::NaiveDate;

/// Turns a rate page into rows, stamped with the capture date.
///
/// An empty result means the page held no recognisable rate table.
pub trait RateParser: Send + Sync {
    fn parse(&self, html: &str, date: NaiveDate) -> Vec<RawRate>;
}
