//! Uniform random delay within a fixed window.

use super::strategy::BackoffStrategy;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

/// Lower bound of the default delay window (inclusive).
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(500);

/// Upper bound of the default delay window (exclusive).
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(7000);

/// Errors raised when a backoff window is misconfigured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackoffError {
    /// The window `[min, max)` contains no whole millisecond.
    #[error("empty delay window: min {min:?} must be below max {max:?}")]
    EmptyWindow {
        /// Configured lower bound
        min: Duration,
        /// Configured upper bound
        max: Duration,
    },

    /// An attempt ceiling of zero would never issue a request.
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
}

/// Backoff that waits a uniformly random, whole number of milliseconds
/// drawn from `[min_delay, max_delay)` before every retry.
///
/// The delay does not grow with the attempt number. Every retry picks a
/// fresh value from the same window:
///
/// ```text
/// delay_ms = floor(random() * (max_ms - min_ms)) + min_ms
/// ```
///
/// With no attempt ceiling (the default) the strategy never gives up.
///
/// # Examples
///
/// ```rust
/// use trellis_core::retry::{BackoffStrategy, RandomWindowBackoff};
/// use std::time::Duration;
///
/// let backoff = RandomWindowBackoff::builder()
///     .min_delay(Duration::from_millis(10))
///     .max_delay(Duration::from_millis(20))
///     .max_attempts(3)
///     .build()
///     .unwrap();
///
/// assert!(backoff.next_delay(1).is_some());
/// assert!(backoff.next_delay(2).is_some());
/// assert!(backoff.next_delay(3).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomWindowBackoff {
    min_delay: Duration,
    max_delay: Duration,
    max_attempts: Option<u32>,
}

impl RandomWindowBackoff {
    /// Create a new builder for configuring the window.
    pub fn builder() -> RandomWindowBackoffBuilder {
        RandomWindowBackoffBuilder::default()
    }

    /// Inclusive lower bound of the delay window.
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Exclusive upper bound of the delay window.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    fn sample(&self) -> Duration {
        let min_ms = self.min_delay.as_millis() as u64;
        let max_ms = self.max_delay.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..max_ms))
    }
}

impl Default for RandomWindowBackoff {
    /// `[500ms, 7000ms)` with no attempt ceiling.
    fn default() -> Self {
        Self {
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            max_attempts: None,
        }
    }
}

impl BackoffStrategy for RandomWindowBackoff {
    fn next_delay(&self, attempts_made: u32) -> Option<Duration> {
        if let Some(max) = self.max_attempts
            && attempts_made >= max
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(attempts_made, max_attempts = max, "Backoff exhausted");
            return None;
        }
        Some(self.sample())
    }

    fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }
}

/// Builder for configuring `RandomWindowBackoff`.
#[derive(Debug, Default)]
pub struct RandomWindowBackoffBuilder {
    min_delay: Option<Duration>,
    max_delay: Option<Duration>,
    max_attempts: Option<u32>,
}

impl RandomWindowBackoffBuilder {
    /// Set the inclusive lower bound of the window.
    ///
    /// Default: 500ms
    pub fn min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = Some(delay);
        self
    }

    /// Set the exclusive upper bound of the window.
    ///
    /// Default: 7000ms
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = Some(delay);
        self
    }

    /// Cap the total number of attempts, the first one included.
    ///
    /// Default: unbounded
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Set or clear the attempt ceiling.
    pub fn max_attempts_opt(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Build the `RandomWindowBackoff` instance.
    ///
    /// # Errors
    ///
    /// - [`BackoffError::EmptyWindow`] if the window holds no whole millisecond
    /// - [`BackoffError::ZeroAttempts`] if the attempt ceiling is zero
    pub fn build(self) -> Result<RandomWindowBackoff, BackoffError> {
        let min_delay = self.min_delay.unwrap_or(DEFAULT_MIN_DELAY);
        let max_delay = self.max_delay.unwrap_or(DEFAULT_MAX_DELAY);

        if min_delay.as_millis() >= max_delay.as_millis() {
            return Err(BackoffError::EmptyWindow {
                min: min_delay,
                max: max_delay,
            });
        }
        if self.max_attempts == Some(0) {
            return Err(BackoffError::ZeroAttempts);
        }

        Ok(RandomWindowBackoff {
            min_delay,
            max_delay,
            max_attempts: self.max_attempts,
        })
    }
}
