//! Request executor: one logical request, as many attempts as 429s demand
//!
//! Each physical attempt goes through the [`Transport`]. A 429 answer is
//! never surfaced: the executor sleeps for a delay picked by its backoff
//! strategy and issues the same request again, one attempt at a time. Any
//! other completion ends the logical request.

use super::{Outcome, RequestDescriptor, Transport};
use crate::error::{Error, Result};
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata};
use serde_json::Value;
use std::sync::Arc;
use trellis_core::retry::{BackoffStrategy, RandomWindowBackoff};

/// Issues requests through a transport, absorbing rate limiting.
#[derive(Debug, Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
    backoff: Arc<dyn BackoffStrategy>,
}

impl Executor {
    /// Create an executor with the default `[500ms, 7000ms)` unbounded backoff.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_backoff(transport, Arc::new(RandomWindowBackoff::default()))
    }

    /// Create an executor with a custom backoff strategy.
    pub fn with_backoff(transport: Arc<dyn Transport>, backoff: Arc<dyn BackoffStrategy>) -> Self {
        Self { transport, backoff }
    }

    /// The transport attempts are issued through.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Run a logical request to its final outcome.
    ///
    /// Resolves with the payload of the first non-429 completion, or rejects
    /// with its error. While the remote keeps answering 429 the future stays
    /// pending; with the default backoff there is no limit on attempts.
    /// Dropping the future abandons the in-flight attempt or pending delay.
    ///
    /// # Errors
    ///
    /// - The error payload of the terminal completion, unmodified
    /// - [`Error::RetriesExhausted`] if the backoff strategy stops retrying
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<Value> {
        let meta = RequestMetadata::new(request.verb().as_str(), request.url().path());
        let timer = RequestTimer::start();
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);
            meta.log_attempt(attempt);

            let completion = self.transport.issue(request).await;
            let status = completion.status.map(|s| s.as_u16());

            match completion.into_outcome() {
                Outcome::RateLimited => {
                    let Some(delay) = self.backoff.next_delay(attempt) else {
                        let error = Error::RetriesExhausted { attempts: attempt };
                        ResponseMetadata::new(status, timer.elapsed())
                            .with_retries(attempt - 1)
                            .log_error(&meta, &error.to_string());
                        return Err(error);
                    };
                    meta.log_rate_limited(attempt, delay);
                    tokio::time::sleep(delay).await;
                }
                Outcome::Failure(error) => {
                    ResponseMetadata::new(status, timer.elapsed())
                        .with_retries(attempt - 1)
                        .log_error(&meta, &error.to_string());
                    return Err(error);
                }
                Outcome::Success(payload) => {
                    ResponseMetadata::new(status, timer.elapsed())
                        .with_retries(attempt - 1)
                        .log_success(&meta);
                    return Ok(payload);
                }
            }
        }
    }
}
