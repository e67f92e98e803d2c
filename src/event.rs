//! Timeline data model: events and the flushed detail record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Direction of a timeline event relative to the recorded sub-operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
    Error,
}

impl Direction {
    /// Returns the direction as the string used in event labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
            Direction::Error => "error",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a request's operation timeline.
///
/// Events are immutable once appended to a [`Recorder`](crate::Recorder);
/// insertion order is significant and reconstructs the causal sequence of
/// sub-operations.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Sanitized composite label, `(leg)node.command` with spaces replaced
    /// by underscores. For error events the leg names where the failure was
    /// observed (usually `output`), while [`Event::direction`] stays `error`.
    pub name: String,
    /// Logical actor, e.g. `"client"`, `"gorm"`, `"mongo"`.
    pub node: String,
    /// Operation name within the node, e.g. `"list_todo"`.
    pub command: String,
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
    /// Opaque payload: the record being written, a query descriptor, a
    /// response body. Null when payload logging is disabled.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub attributes: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Event {
    pub(crate) fn new(
        node: &str,
        command: &str,
        leg: Direction,
        direction: Direction,
        attributes: Value,
        error_message: Option<String>,
    ) -> Self {
        Self {
            name: event_name(node, command, leg),
            node: node.to_string(),
            command: command.to_string(),
            direction,
            timestamp: Utc::now(),
            attributes,
            error_message,
        }
    }
}

/// Builds the `(leg)node.command` label, spaces replaced by underscores so
/// the label stays a single token in downstream log processors.
fn event_name(node: &str, command: &str, leg: Direction) -> String {
    format!("({}){}.{}", leg.as_str(), node, command).replace(' ', "_")
}

/// One flushed, structured summary of a request's operation timeline.
///
/// Emitted at most once per [`flush`](crate::Recorder::flush); a recorder
/// with an empty timeline never produces a record.
#[derive(Debug, Clone, Serialize)]
pub struct DetailRecord {
    /// Derived from the last `node.command` pair recorded (last writer
    /// wins), spaces replaced by underscores.
    pub operation: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Monotonic elapsed time since recorder construction. Always covers
    /// the full request so far, even when a recorder flushes more than once.
    pub elapsed: Duration,
    /// Caller-supplied metadata (route, method, device, session id), echoed
    /// verbatim; the recorder never inspects specific keys.
    pub context: Value,
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direction_labels() {
        assert_eq!(Direction::Input.as_str(), "input");
        assert_eq!(Direction::Output.as_str(), "output");
        assert_eq!(Direction::Error.to_string(), "error");
    }

    #[test]
    fn test_event_name_sanitized() {
        let event = Event::new(
            "client",
            "new task",
            Direction::Input,
            Direction::Input,
            Value::Null,
            None,
        );
        assert_eq!(event.name, "(input)client.new_task");
        assert_eq!(event.node, "client");
        assert_eq!(event.command, "new task");
    }

    #[test]
    fn test_error_event_keeps_leg_in_name() {
        let event = Event::new(
            "gorm",
            "list_todo",
            Direction::Output,
            Direction::Error,
            Value::Null,
            Some("connection refused".into()),
        );
        assert_eq!(event.name, "(output)gorm.list_todo");
        assert_eq!(event.direction, Direction::Error);
    }

    #[test]
    fn test_event_serialization_skips_empty_fields() {
        let event = Event::new(
            "client",
            "ping",
            Direction::Input,
            Direction::Input,
            Value::Null,
            None,
        );
        let encoded = serde_json::to_value(&event).unwrap();
        assert!(encoded.get("attributes").is_none());
        assert!(encoded.get("error_message").is_none());
        assert_eq!(encoded["direction"], json!("input"));
    }
}
