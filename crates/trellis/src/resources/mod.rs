//! API resource endpoints
//!
//! Endpoints grouped by the root of their path. Each handle holds a clone of
//! the [`Client`] and forwards to its convenience methods.

pub mod boards;
pub mod cards;
pub mod lists;
pub mod members;

pub use boards::Boards;
pub use cards::Cards;
pub use lists::Lists;
pub use members::Members;

use crate::client::Client;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}
