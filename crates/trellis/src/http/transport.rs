//! Transport trait: the capability that performs one physical attempt
//!
//! The executor only knows that issuing a request yields exactly one
//! [`Completion`]: an optional status code plus either a parsed payload or
//! an error. Connection handling, TLS and body decoding live behind this
//! trait.

use super::RequestDescriptor;
use crate::error::Error;
use async_trait::async_trait;
use http::StatusCode;
use serde_json::Value;
use std::fmt;

/// Performs single HTTP attempts against the remote API.
///
/// Implementations must not retry on their own; every call to
/// [`issue`](Transport::issue) is one physical attempt.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Issue one attempt and report how it completed.
    ///
    /// Failures are reported inside the returned [`Completion`], never by
    /// panicking.
    async fn issue(&self, request: &RequestDescriptor) -> Completion;

    /// Transport name for logging.
    fn name(&self) -> &'static str;
}

/// The single completion of one physical attempt.
#[derive(Debug)]
pub struct Completion {
    /// HTTP status, when a response was received.
    pub status: Option<StatusCode>,
    /// Parsed body, or the error that ended the attempt.
    pub payload: Result<Value, Error>,
}

impl Completion {
    /// A response with a decoded body.
    pub fn success(status: StatusCode, body: Value) -> Self {
        Self {
            status: Some(status),
            payload: Ok(body),
        }
    }

    /// An attempt that ended in an error, with the status if one arrived.
    pub fn failure(status: Option<StatusCode>, error: Error) -> Self {
        Self {
            status,
            payload: Err(error),
        }
    }

    /// An HTTP 429 answer.
    pub fn rate_limited() -> Self {
        Self {
            status: Some(StatusCode::TOO_MANY_REQUESTS),
            payload: Ok(Value::Null),
        }
    }

    /// Classify the completion.
    ///
    /// A 429 status wins over whatever the payload holds; otherwise an error
    /// payload is a failure and anything else a success.
    pub fn into_outcome(self) -> Outcome {
        if self.status == Some(StatusCode::TOO_MANY_REQUESTS) {
            return Outcome::RateLimited;
        }
        match self.payload {
            Err(error) => Outcome::Failure(error),
            Ok(body) => Outcome::Success(body),
        }
    }
}

/// What the executor does with a completion.
#[derive(Debug)]
pub enum Outcome {
    /// Resolve the logical request with this payload.
    Success(Value),
    /// Wait, then issue another attempt.
    RateLimited,
    /// Reject the logical request with this error.
    Failure(Error),
}
