//! # detail-trace
//!
//! Request-scoped detail logging and backend-agnostic query translation for
//! storage adapters.
//!
//! Two small components, composed by the request handler that owns them:
//!
//! - **[`Recorder`]** — accumulates a causal timeline of `input` / `output` /
//!   `error` events while one request is handled, then flushes exactly one
//!   structured [`DetailRecord`] (start, end, elapsed, context attributes,
//!   ordered events) to an injected [`RecordSink`].
//! - **[`FindOption`]** — a filter/sort/projection spec built from query
//!   parameters and translated into either relational fragments
//!   ([`SqlQuery`]) or document-store documents ([`DocumentQuery`]), each
//!   with a human-readable raw-query rendering for audit logs.
//!
//! ## Features
//!
//! - **One record per operation**: the whole request timeline lands in a
//!   single structured log event, ordered as recorded
//! - **Best-effort by design**: payloads that cannot be encoded degrade to a
//!   marker string; sink trouble never fails a request
//! - **Injected sink**: no process-global logger state — the host wires a
//!   [`TracingSink`] (or its own [`RecordSink`]) once at startup
//! - **Pure translation**: `FindOption` to query descriptors is stateless,
//!   I/O-free, and safe for unlimited concurrent use
//! - **Framework-neutral boundary**: transport adapters implement one
//!   [`RequestContext`] trait; the core never depends on a concrete
//!   framework type
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use detail_trace::{FindOption, Recorder, SortDirection, TracingSink};
//! use serde_json::json;
//!
//! // Wired once at startup, shared across requests.
//! let sink = Arc::new(TracingSink::new());
//!
//! // Per request: the transport adapter builds the recorder.
//! let mut recorder = Recorder::new(
//!     sink.clone(),
//!     json!({"route": "/todo", "method": "GET", "session": "01J..."}),
//! );
//! recorder.record_input("client", "list_todo", json!({"s": "milk"}));
//!
//! // The storage adapter translates the option and records its leg.
//! let option = FindOption::new()
//!     .with_search("title", "milk")
//!     .with_sort("created_at", SortDirection::Desc);
//! let query = option.to_sql("todos");
//! recorder.record_output("gorm", "list_todo", json!({"query": query.raw}));
//!
//! // The handler closes the timeline.
//! recorder.record_output("client", "list_todo", json!({"count": 2})).flush();
//! ```
//!
//! ## Emitted record fields
//!
//! [`TracingSink`] renders each flushed record as one INFO event:
//!
//! | Field | Description |
//! |-------|-------------|
//! | `log_name` | Always `"DETAIL"` |
//! | message | Operation name, from the last `node.command` recorded |
//! | `start_time` / `end_time` | RFC3339 wall-clock bounds |
//! | `elapsed_ms` | Monotonic elapsed time since recorder construction |
//! | `context` | Caller-supplied attributes, echoed verbatim as JSON |
//! | `events` | The ordered timeline as JSON |

mod config;
mod event;
mod query;
mod recorder;
mod sink;
mod transport;

pub use config::RecorderConfig;
pub use event::{DetailRecord, Direction, Event};
pub use query::{DocumentQuery, FindOption, SortDirection, SqlQuery};
pub use recorder::Recorder;
pub use sink::{MemorySink, RecordSink, TracingSink};
pub use transport::{BoxError, RequestContext};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Direction, FindOption, Recorder, RecorderConfig, RecordSink, RequestContext,
        SortDirection, TracingSink,
    };
}
