use crate::domain::ports::diagnostics::{DiagnosticsSink, FallbackEvent};
use std::sync::Mutex;
use tracing::warn;

/// Reports fallback events as structured `warn` logs.
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn record(&self, event: FallbackEvent) {
        warn!(kind = %event.kind, cause = %event.cause, "fallback taken");
    }
}

/// Keeps fallback events in memory, in arrival order.
#[derive(Default)]
pub struct MemoryDiagnostics {
    events: Mutex<Vec<FallbackEvent>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FallbackEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl DiagnosticsSink for MemoryDiagnostics {
    fn record(&self, event: FallbackEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
