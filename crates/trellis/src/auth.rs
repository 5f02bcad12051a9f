//! API key and token handling

use crate::http::QueryParams;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// The key/token pair Trello authenticates every request with.
///
/// Both values travel as the `key` and `token` query parameters.
#[derive(Clone)]
pub struct Credentials {
    key: SecretString,
    token: SecretString,
}

impl Credentials {
    /// Create a credential pair.
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self::from_secrets(
            SecretString::new(key.into().into_boxed_str()),
            SecretString::new(token.into().into_boxed_str()),
        )
    }

    /// Create a credential pair from already-wrapped secrets.
    pub fn from_secrets(key: SecretString, token: SecretString) -> Self {
        Self { key, token }
    }

    /// The API key.
    pub fn key(&self) -> &SecretString {
        &self.key
    }

    /// The user token.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Write `key` and `token` into a query, overwriting existing entries.
    pub(crate) fn apply(&self, query: &mut QueryParams) {
        query.insert("key", self.key.expose_secret());
        query.insert("token", self.token.expose_secret());
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"[REDACTED]")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
