#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core abstractions for the trellis Trello client.
//!
//! This crate holds the backoff policy used when the remote API answers
//! with HTTP 429:
//!
//! - **`BackoffStrategy`**: decides how long to wait before the next attempt
//!   and when to stop trying
//! - **`RandomWindowBackoff`**: a uniformly random delay drawn from a fixed
//!   `[min, max)` window, with an optional ceiling on attempts
//!
//! # Examples
//!
//! ```rust
//! use trellis_core::prelude::*;
//! use std::time::Duration;
//!
//! let backoff = RandomWindowBackoff::builder()
//!     .min_delay(Duration::from_millis(500))
//!     .max_delay(Duration::from_millis(7000))
//!     .build()
//!     .unwrap();
//!
//! let delay = backoff.next_delay(1).unwrap();
//! assert!(delay >= Duration::from_millis(500));
//! assert!(delay < Duration::from_millis(7000));
//! ```

pub mod retry;

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use trellis_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::retry::{
        BackoffError, BackoffStrategy, RandomWindowBackoff, RandomWindowBackoffBuilder,
    };
}
