use std::sync::Mutex;

/// Structured event emitted while assembling page data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// A section produced content
    SectionFound {
        key: String,
        chars: usize,
        preview: String,
    },
    /// Every strategy for a section came back empty
    SectionMissing { key: String },
    /// A section's strategy chain hit a traversal failure
    SectionFailed { key: String, error: String },
    /// Snapshot or image collection failed; the minimal record was returned
    ExtractionDegraded { error: String },
}

/// Receives diagnostic events; never influences extraction results
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: &DiagnosticEvent);
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn record(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::SectionFound {
                key,
                chars,
                preview,
            } => {
                ::log::info!("{}: found ({} chars)", key, chars);
                ::log::debug!("  {}: {}", key, preview);
            }
            DiagnosticEvent::SectionMissing { key } => ::log::info!("{}: not found", key),
            DiagnosticEvent::SectionFailed { key, error } => {
                ::log::warn!("{}: not found, extraction failed: {}", key, error)
            }
            DiagnosticEvent::ExtractionDegraded { error } => {
                ::log::error!("Page extraction degraded to minimal data: {}", error)
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {
    fn record(&self, _event: &DiagnosticEvent) {}
}

/// Keeps every event in memory, in arrival order
#[derive(Debug, Default)]
pub struct CapturingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events recorded so far
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticsSink for CapturingSink {
    fn record(&self, event: &DiagnosticEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
