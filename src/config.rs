//! Configuration for recorder behavior.

use std::time::Duration;

/// Configuration options for detail recording.
///
/// # Example
///
/// ```rust
/// use detail_trace::RecorderConfig;
/// use std::time::Duration;
///
/// let config = RecorderConfig::default()
///     .with_payload_logging(false)
///     .with_slow_request_threshold(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Whether to include event payloads (request bodies, query descriptors,
    /// response data) in flushed records.
    /// Default: `true` — the timeline is the point of the record. Disable in
    /// environments where payloads may carry sensitive data.
    pub log_payloads: bool,

    /// Threshold for flagging slow requests at WARN level.
    /// Flushes whose elapsed time exceeds this duration emit an additional
    /// warning alongside the detail record.
    /// Default: 1s
    pub slow_request_threshold: Duration,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            log_payloads: true,
            slow_request_threshold: Duration::from_secs(1),
        }
    }
}

impl RecorderConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable payload logging in flushed records.
    ///
    /// **Security Warning**: payloads often contain user input and
    /// potentially sensitive data. When disabled, event attributes are
    /// recorded as null while the timeline structure is kept intact.
    pub fn with_payload_logging(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }

    /// Set the threshold for slow request warnings.
    ///
    /// Requests whose recorded timeline spans longer than this duration
    /// will be logged at WARN level when flushed.
    pub fn with_slow_request_threshold(mut self, threshold: Duration) -> Self {
        self.slow_request_threshold = threshold;
        self
    }

    /// Create a development-friendly configuration with full payload
    /// logging and an aggressive slow-request threshold.
    pub fn development() -> Self {
        Self {
            log_payloads: true,
            slow_request_threshold: Duration::from_millis(100),
        }
    }

    /// Create a production-safe configuration that keeps timelines but
    /// drops payload bodies.
    pub fn production() -> Self {
        Self {
            log_payloads: false,
            slow_request_threshold: Duration::from_secs(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = RecorderConfig::default()
            .with_payload_logging(false)
            .with_slow_request_threshold(Duration::from_millis(250));

        assert!(!config.log_payloads);
        assert_eq!(config.slow_request_threshold, Duration::from_millis(250));
    }

    #[test]
    fn test_development_config() {
        let config = RecorderConfig::development();
        assert!(config.log_payloads);
        assert_eq!(config.slow_request_threshold, Duration::from_millis(100));
    }

    #[test]
    fn test_production_config() {
        let config = RecorderConfig::production();
        assert!(!config.log_payloads);
    }
}
