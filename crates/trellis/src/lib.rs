//! # Trellis
//!
//! Async Rust client for the Trello REST API:
//! - A generic `request` passthrough for any endpoint and verb
//! - Typed listings for tokens, boards, lists, cards, checklists and comments
//! - Key/token authentication on every request
//! - Transparent retries of rate-limited (HTTP 429) requests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trellis::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("your-api-key", "your-token");
//!
//!     for board in client.get_boards("me", None).await? {
//!         println!("{} ({})", board.name, board.id);
//!         for list in client.get_lists(&board.id, None).await? {
//!             println!("  {}", list.name);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Rate limiting
//!
//! When Trello answers 429, the request is sent again after a random delay
//! between 500 ms and 7 s. There is no limit on the number of attempts unless
//! one is set with [`ClientBuilder::max_attempts`]; drop the future to give up.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use auth::Credentials;
pub use client::{Client, ClientBuilder, Options};
pub use config::{ClientConfig, RateLimitConfig};
pub use error::{Error, Result};
pub use http::{Completion, Transport, Verb};
pub use types::*;

// Module declarations
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod resources;
pub mod types;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;
pub use serde_json::Value as JsonValue;
pub use trellis_core::retry::{BackoffStrategy, RandomWindowBackoff};

/// Version of the SDK
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Client, ClientBuilder, Credentials, Error, Options, Result,
        types::{Board, Card, CheckItem, Checklist, Comment, Label, List, Token},
    };
}
