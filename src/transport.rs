//! The capability interface between web-framework adapters and the core.
//!
//! Every transport adapter (axum, actix, a test harness) implements
//! [`RequestContext`] for its own request type; handlers and storage
//! adapters are written against the trait and never see a concrete
//! framework type. The adapters themselves live with the host application.

use async_trait::async_trait;
use serde_json::Value;

use crate::recorder::Recorder;

/// Boxed error for adapter-side failures (body decoding, transport I/O).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One request's worth of transport capability.
///
/// The contract a handler relies on: decode the request body, respond with
/// JSON, read route and query parameters, and obtain the request's
/// [`Recorder`]. `recorder` constructs a fresh recorder carrying the
/// adapter's context attributes (route, method, device, session id) and the
/// process-wide sink; calling it more than once per request yields
/// independent recorders, so adapters normally call it once and hand the
/// recorder down the call chain.
#[async_trait]
pub trait RequestContext: Send {
    /// Decode the request body as JSON.
    async fn bind_json(&mut self) -> Result<Value, BoxError>;

    /// Send a JSON response with the given status code.
    async fn respond_json(&mut self, status: u16, body: Value);

    /// Route parameter by name, e.g. the `id` in `/todo/:id`.
    fn param(&self, name: &str) -> Option<String>;

    /// Query-string parameter by name.
    fn query(&self, name: &str) -> Option<String>;

    /// Build the detail recorder for this request.
    fn recorder(&self) -> Recorder;
}
