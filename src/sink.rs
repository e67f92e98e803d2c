//! Record sinks: where flushed detail records go.
//!
//! The sink is an explicit dependency injected into every
//! [`Recorder`](crate::Recorder) at construction. The host process owns its
//! lifecycle — initialize once at startup, share via `Arc`, never mutate
//! mid-request.

use std::sync::Mutex;

use crate::event::DetailRecord;

/// Destination for flushed [`DetailRecord`]s.
///
/// Delivery is best-effort: `emit` is infallible by contract and must not
/// block the request path. A sink that cannot accept a record drops it
/// internally; sink trouble never becomes a request failure.
pub trait RecordSink: Send + Sync {
    fn emit(&self, record: DetailRecord);
}

/// Default sink: renders each record as one structured `tracing` event.
///
/// The record is emitted at INFO level with `log_name = "DETAIL"` as the
/// discriminator field, the operation name as the message, RFC3339 start and
/// end times, elapsed milliseconds, and the context and event timeline as
/// compact JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl RecordSink for TracingSink {
    fn emit(&self, record: DetailRecord) {
        let events = serde_json::to_string(&record.events)
            .unwrap_or_else(|e| format!("\"<events unavailable: {e}>\""));
        let context = serde_json::to_string(&record.context)
            .unwrap_or_else(|e| format!("\"<context unavailable: {e}>\""));

        tracing::info!(
            log_name = "DETAIL",
            start_time = %record.start_time.to_rfc3339(),
            end_time = %record.end_time.to_rfc3339(),
            elapsed_ms = record.elapsed.as_millis() as u64,
            context = %context,
            events = %events,
            "{}",
            record.operation,
        );
    }
}

/// Capturing sink backed by a `Mutex<Vec<_>>`.
///
/// Intended for tests and demos that need to observe what a recorder
/// actually flushed.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<DetailRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn records(&self) -> Vec<DetailRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSink for MemorySink {
    fn emit(&self, record: DetailRecord) {
        // A poisoned lock means a panicking test thread; drop the record
        // rather than propagate.
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}
