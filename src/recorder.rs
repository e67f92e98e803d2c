//! Request-scoped detail recorder.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::RecorderConfig;
use crate::event::{DetailRecord, Direction, Event};
use crate::sink::RecordSink;

/// Accumulates a causal timeline of sub-operations performed while handling
/// one request, then emits exactly one structured record per flush.
///
/// A recorder is created fresh at request entry by the transport adapter and
/// owned by that request's call chain for its whole lifetime. It is `Send`
/// but holds no internal lock: all appends go through `&mut self`, so a
/// request path that fans out must serialize access itself (confine the
/// recorder to one task, or guard it).
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use detail_trace::{Recorder, TracingSink};
/// use serde_json::json;
///
/// let mut recorder = Recorder::new(
///     Arc::new(TracingSink::new()),
///     json!({"route": "/todo", "method": "GET"}),
/// );
///
/// recorder.record_input("client", "list_todo", json!({"query": "title=milk"}));
/// // ... call into storage, which records its own events ...
/// recorder.record_output("client", "list_todo", json!({"count": 2})).flush();
/// ```
pub struct Recorder {
    sink: Arc<dyn RecordSink>,
    config: RecorderConfig,
    context: Value,
    operation: String,
    start: Instant,
    start_time: DateTime<Utc>,
    events: Vec<Event>,
}

impl Recorder {
    /// Create a recorder with default configuration.
    ///
    /// `context` is opaque caller metadata (route, method, device, session
    /// id) echoed verbatim into every flushed record; the recorder never
    /// inspects specific keys.
    pub fn new(sink: Arc<dyn RecordSink>, context: Value) -> Self {
        Self::with_config(sink, RecorderConfig::default(), context)
    }

    /// Create a recorder with a custom configuration.
    pub fn with_config(sink: Arc<dyn RecordSink>, config: RecorderConfig, context: Value) -> Self {
        Self {
            sink,
            config,
            context,
            operation: String::new(),
            start: Instant::now(),
            start_time: Utc::now(),
            events: Vec::new(),
        }
    }

    /// Get the recorder configuration.
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Number of events recorded since the last flush.
    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Append an input event and name the operation `node.command`.
    ///
    /// Naming is last-writer-wins: the final sub-operation recorded before a
    /// flush labels the whole record. Empty `node` or `command` is legal and
    /// simply yields empty name segments.
    pub fn record_input(&mut self, node: &str, command: &str, payload: impl Serialize) {
        self.append(node, command, Direction::Input, Direction::Input, payload, None);
    }

    /// Append an output event.
    ///
    /// Returns the recorder so `record_output(..).flush()` chains; chaining
    /// is a convenience, not a requirement — this method never flushes on
    /// its own.
    pub fn record_output(&mut self, node: &str, command: &str, payload: impl Serialize) -> &mut Self {
        self.append(node, command, Direction::Output, Direction::Output, payload, None);
        self
    }

    /// Append an error event, then flush.
    ///
    /// `leg` names where the failure was observed (usually
    /// [`Direction::Output`]) and goes into the event label; the event's own
    /// direction is always `error`. An error is terminal for this slice of
    /// the timeline, so the flush is implicit.
    pub fn record_error(
        &mut self,
        node: &str,
        command: &str,
        leg: Direction,
        payload: impl Serialize,
        error: impl std::fmt::Display,
    ) {
        self.append(
            node,
            command,
            leg,
            Direction::Error,
            payload,
            Some(error.to_string()),
        );
        self.flush();
    }

    /// Emit one [`DetailRecord`] covering everything recorded since the last
    /// flush, then clear the timeline.
    ///
    /// A flush with zero events is a silent no-op — a handler that opens a
    /// recorder and takes an early-return path never emits an empty record.
    /// Recording after a flush is legal and starts a fresh slice of the
    /// timeline; `start_time` stays the original request start so elapsed
    /// time keeps covering the full request.
    pub fn flush(&mut self) {
        if self.events.is_empty() {
            return;
        }

        let elapsed = self.start.elapsed();
        let record = DetailRecord {
            operation: self.operation.replace(' ', "_"),
            start_time: self.start_time,
            end_time: Utc::now(),
            elapsed,
            context: self.context.clone(),
            events: std::mem::take(&mut self.events),
        };

        if elapsed > self.config.slow_request_threshold {
            tracing::warn!(
                operation = %record.operation,
                elapsed_ms = elapsed.as_millis() as u64,
                threshold_ms = self.config.slow_request_threshold.as_millis() as u64,
                "Slow request detected"
            );
        }

        self.sink.emit(record);
    }

    /// Free-form INFO message outside the timeline. Does not append an
    /// event and does not affect flush state.
    pub fn info(&self, msg: &str) {
        tracing::info!(operation = %self.operation, "{}", msg);
    }

    /// Free-form DEBUG message outside the timeline.
    pub fn debug(&self, msg: &str) {
        tracing::debug!(operation = %self.operation, "{}", msg);
    }

    /// Free-form WARN message outside the timeline.
    pub fn warn(&self, msg: &str) {
        tracing::warn!(operation = %self.operation, "{}", msg);
    }

    /// Free-form ERROR message outside the timeline.
    pub fn error(&self, msg: &str) {
        tracing::error!(operation = %self.operation, "{}", msg);
    }

    fn append(
        &mut self,
        node: &str,
        command: &str,
        leg: Direction,
        direction: Direction,
        payload: impl Serialize,
        error_message: Option<String>,
    ) {
        self.operation = format!("{}.{}", node, command);
        let attributes = self.attributes(payload);
        self.events
            .push(Event::new(node, command, leg, direction, attributes, error_message));
    }

    /// Best-effort payload capture: a value that cannot be represented as
    /// JSON degrades to a marker string rather than failing the request.
    fn attributes(&self, payload: impl Serialize) -> Value {
        if !self.config.log_payloads {
            return Value::Null;
        }
        match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(e) => Value::String(format!("<unserializable: {e}>")),
        }
    }
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("operation", &self.operation)
            .field("start_time", &self.start_time)
            .field("pending", &self.events.len())
            .finish()
    }
}
