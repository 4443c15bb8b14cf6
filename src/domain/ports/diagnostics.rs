//! Fallback diagnostics port.
//!
//! The rate pipeline degrades instead of failing, so end users rarely see an
//! error. Every degradation is reported here so operators still can.

use serde::Serialize;
use std::fmt;

/// Which step of the pipeline degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackKind {
    /// Cache read failed; fetching live instead.
    CacheRead,
    /// Writing the fresh result set back to the cache failed.
    CacheWrite,
    /// The current rates page could not be fetched.
    LiveFetch,
    /// The current rates page had no usable rate table.
    LiveEmpty,
    /// The historical page could not be fetched; using the built-in baseline.
    HistoricalFetch,
    /// The historical page had no usable rate table; using the built-in baseline.
    HistoricalEmpty,
    /// Remote translation failed; the label passed through unchanged.
    Translation,
    /// The built-in mock dataset was served.
    MockDataset,
}

impl fmt::Display for FallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FallbackKind::CacheRead => "cache_read",
            FallbackKind::CacheWrite => "cache_write",
            FallbackKind::LiveFetch => "live_fetch",
            FallbackKind::LiveEmpty => "live_empty",
            FallbackKind::HistoricalFetch => "historical_fetch",
            FallbackKind::HistoricalEmpty => "historical_empty",
            FallbackKind::Translation => "translation",
            FallbackKind::MockDataset => "mock_dataset",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackEvent {
    pub kind: FallbackKind,
    pub cause: String,
}

impl FallbackEvent {
    pub fn new(kind: FallbackKind, cause: impl Into<String>) -> Self {
        Self {
            kind,
            cause: cause.into(),
        }
    }
}

/// Receives fallback events.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: FallbackEvent);
}
