//! Basic example showing how to use detail-trace.
//!
//! Walks one simulated list request through the recorder and both
//! translator paths, flushing the detail record to stdout via `tracing`.
//!
//! Run with: cargo run --example basic

use std::sync::Arc;

use detail_trace::prelude::*;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,detail_trace=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The sink is wired once at startup and shared across requests.
    let sink: Arc<dyn RecordSink> = Arc::new(TracingSink::new());

    // Option 1: Simple construction with defaults
    let mut recorder = Recorder::new(
        sink.clone(),
        json!({
            "route": "/todo",
            "method": "GET",
            "device": "curl/8.5.0",
            "session": "0190a6be-demo",
        }),
    );

    // Option 2: With custom configuration
    // let mut recorder = Recorder::with_config(
    //     sink.clone(),
    //     RecorderConfig::default()
    //         .with_payload_logging(false)
    //         .with_slow_request_threshold(Duration::from_millis(200)),
    //     json!({"route": "/todo"}),
    // );

    // Option 3: Development config (aggressive slow-request threshold)
    // let mut recorder = Recorder::with_config(
    //     sink.clone(),
    //     RecorderConfig::development(),
    //     json!({"route": "/todo"}),
    // );

    // The handler records the decoded request as the client input leg.
    recorder.record_input("client", "list task", json!({"s": "milk", "order": "desc"}));

    // The storage adapter translates the find options and records its leg.
    let option = FindOption::new()
        .with_search("title", "milk")
        .with_sort("title", SortDirection::from_token("desc"))
        .with_select(["id", "title"]);

    let sql = option.to_sql("todos");
    tracing::info!(query = %sql.raw, "relational translation");
    recorder.record_output("gorm", "list_todo", json!({"query": sql.raw}));

    let doc = option.to_document("todos");
    tracing::info!(query = %doc.raw, "document translation");
    recorder.record_output("mongo", "list_todo", json!({"query": doc.raw}));

    // The handler closes the timeline; one DETAIL record is emitted.
    recorder
        .record_output("client", "list task", json!({"count": 2}))
        .flush();
}
