//! Structured logging for requests and their attempts
//!
//! All request traffic is logged through this layer so field names stay
//! consistent. Only the URL path is ever logged; the query string carries
//! credentials and never reaches a log line.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path, without query string
    pub path: String,
}

impl RequestMetadata {
    /// Create new request metadata
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Log a physical attempt being sent
    pub fn log_attempt(&self, attempt: u32) {
        debug!(
            method = %self.method,
            path = %self.path,
            attempt,
            "Sending HTTP request"
        );
    }

    /// Log a 429 answer that will be retried after `delay`
    pub fn log_rate_limited(&self, attempt: u32, delay: Duration) {
        warn!(
            method = %self.method,
            path = %self.path,
            attempt,
            delay_ms = delay.as_millis() as u64,
            "Rate limited, retrying after delay"
        );
    }
}

/// Terminal outcome metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code, if a response arrived
    pub status: Option<u16>,
    /// Time elapsed across all attempts
    pub elapsed: Duration,
    /// Number of retries taken (attempts minus one)
    pub retries: u32,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: Option<u16>, elapsed: Duration) -> Self {
        Self {
            status,
            elapsed,
            retries: 0,
        }
    }

    /// Set the number of retries
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Log successful response
    pub fn log_success(&self, request: &RequestMetadata) {
        info!(
            method = %request.method,
            path = %request.path,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis() as u64,
            retries = self.retries,
            "HTTP request succeeded"
        );
    }

    /// Log failed response
    pub fn log_error(&self, request: &RequestMetadata, error: &str) {
        warn!(
            method = %request.method,
            path = %request.path,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis() as u64,
            error = %error,
            retries = self.retries,
            "HTTP request failed"
        );
    }
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `trellis=info`).
///
/// Returns an error if a global subscriber is already set.
#[cfg(feature = "trace")]
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trellis=info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}
