//! The backoff strategy trait.

use std::fmt;
use std::time::Duration;

/// A strategy for spacing out repeated attempts of a rate-limited operation.
///
/// The caller drives the loop: after each attempt that must be repeated it
/// asks the strategy for the delay to wait, and stops when the strategy
/// returns `None`.
///
/// # Examples
///
/// ```rust
/// use trellis_core::retry::BackoffStrategy;
/// use std::time::Duration;
///
/// #[derive(Debug)]
/// struct Fixed(Duration);
///
/// impl BackoffStrategy for Fixed {
///     fn next_delay(&self, _attempts_made: u32) -> Option<Duration> {
///         Some(self.0)
///     }
/// }
///
/// let fixed = Fixed(Duration::from_secs(1));
/// assert_eq!(fixed.next_delay(3), Some(Duration::from_secs(1)));
/// assert_eq!(fixed.max_attempts(), None);
/// ```
pub trait BackoffStrategy: Send + Sync + fmt::Debug {
    /// Calculate the delay before the next attempt.
    ///
    /// # Parameters
    /// - `attempts_made`: number of attempts already issued (1 after the
    ///   first attempt)
    ///
    /// # Returns
    /// - `Some(Duration)`: wait this long, then issue another attempt
    /// - `None`: no further attempts should be made
    fn next_delay(&self, attempts_made: u32) -> Option<Duration>;

    /// Upper bound on the total number of attempts, if any.
    ///
    /// `None` means attempts continue for as long as the operation keeps
    /// asking for them.
    fn max_attempts(&self) -> Option<u32> {
        None
    }
}
