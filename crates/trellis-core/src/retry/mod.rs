//! Retry strategies and backoff implementations.
//!
//! # Key Types
//!
//! - [`BackoffStrategy`] - Core trait for retry strategies
//! - [`RandomWindowBackoff`] - Uniform random delay within a fixed window
//!
//! # Examples
//!
//! ```rust
//! use trellis_core::retry::{BackoffStrategy, RandomWindowBackoff};
//!
//! let backoff = RandomWindowBackoff::default();
//! assert_eq!(backoff.max_attempts(), None);
//! assert!(backoff.next_delay(1_000).is_some());
//! ```

mod strategy;
mod window;

pub use strategy::BackoffStrategy;
pub use window::{BackoffError, RandomWindowBackoff, RandomWindowBackoffBuilder};
