//! HTTP layer: request descriptors, the transport boundary and the executor
//!
//! The [`Executor`] owns the rate-limit retry loop; a [`Transport`] performs
//! one physical attempt at a time. [`ReqwestTransport`] is the default
//! transport.

pub use executor::Executor;
pub use request::{QueryParams, RequestDescriptor, Verb, merge_query, render_query_value};
pub use reqwest_transport::{DEFAULT_TIMEOUT, ReqwestTransport, ReqwestTransportBuilder};
pub use transport::{Completion, Outcome, Transport};

mod executor;
mod request;
mod reqwest_transport;
mod transport;

#[cfg(test)]
pub(crate) mod mock;

// Re-export HTTP types from the http crate for convenience
pub use http::StatusCode;
