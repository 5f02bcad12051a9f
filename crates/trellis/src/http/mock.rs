//! Scripted transport for unit tests
//!
//! Replays a queue of completions and records every attempt with the
//! (tokio) instant it was issued, so tests can check request identity and
//! the spacing between retries under a paused clock.

use super::{Completion, RequestDescriptor, Transport};
use crate::error::Error;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::time::Instant;

/// One attempt seen by the transport.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub request: RequestDescriptor,
    pub at: Instant,
}

#[derive(Debug)]
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Completion>>,
    repeat_rate_limit: bool,
    calls: Mutex<Vec<RecordedCall>>,
    in_flight: AtomicU32,
    max_in_flight: AtomicU32,
}

impl ScriptedTransport {
    /// Answer attempts with `script`, in order. Extra attempts fail.
    pub fn new(script: Vec<Completion>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            repeat_rate_limit: false,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicU32::new(0),
            max_in_flight: AtomicU32::new(0),
        }
    }

    /// Answer every attempt with HTTP 429.
    pub fn always_rate_limited() -> Self {
        Self {
            repeat_rate_limit: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> u32 {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn issue(&self, request: &RequestDescriptor) -> Completion {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        self.calls.lock().unwrap().push(RecordedCall {
            request: request.clone(),
            at: Instant::now(),
        });
        tokio::task::yield_now().await;

        let next = self.script.lock().unwrap().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match next {
            Some(completion) => completion,
            None if self.repeat_rate_limit => Completion::rate_limited(),
            None => Completion::failure(None, Error::Connection("script exhausted".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
