//! Request descriptors, verbs and query parameters

use crate::auth::Credentials;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Query keys whose values are redacted from `Debug` output.
const REDACTED_KEYS: [&str; 2] = ["key", "token"];

/// The HTTP verbs the Trello API is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Verb {
    /// All supported verbs.
    pub const ALL: [Verb; 4] = [Verb::Post, Verb::Get, Verb::Put, Verb::Delete];

    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }

    /// The matching `http::Method`.
    pub fn as_method(&self) -> http::Method {
        match self {
            Verb::Get => http::Method::GET,
            Verb::Post => http::Method::POST,
            Verb::Put => http::Method::PUT,
            Verb::Delete => http::Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = Error;

    /// Parse a verb name, ignoring ASCII case.
    fn from_str(name: &str) -> Result<Self> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnsupportedMethod(name.to_string()))
    }
}

/// Query-string parameters of a request, kept in key order.
///
/// Values for `key` and `token` are hidden from the `Debug` representation.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Write every entry of a JSON object, rendering values as query strings.
    pub fn extend_from_options(&mut self, options: &Map<String, Value>) {
        for (key, value) in options {
            self.insert(key.clone(), render_query_value(value));
        }
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| {
                let shown = if REDACTED_KEYS.contains(&k.as_str()) {
                    "[REDACTED]"
                } else {
                    v.as_str()
                };
                (k, shown)
            }))
            .finish()
    }
}

/// Merge query layers into one parameter set.
///
/// Layers are applied in order: caller `options` first, then the endpoint's
/// `fixed` parameters, then the credential pair. A later layer overwrites an
/// earlier one on key collision, so credentials always win.
pub fn merge_query(
    options: Option<&Map<String, Value>>,
    fixed: &[(&str, &str)],
    credentials: &Credentials,
) -> QueryParams {
    let mut query = QueryParams::new();
    if let Some(options) = options {
        query.extend_from_options(options);
    }
    for (key, value) in fixed {
        query.insert(*key, *value);
    }
    credentials.apply(&mut query);
    query
}

/// Render a JSON option value the way Trello expects it in a query string.
///
/// Strings pass through, numbers and booleans use their display form, `null`
/// becomes empty, arrays become comma-separated lists and objects are sent as
/// compact JSON.
pub fn render_query_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(render_query_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// A fully-resolved logical request.
///
/// Built once per caller request; every physical attempt issued for it
/// reuses the same descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    verb: Verb,
    url: Url,
    query: QueryParams,
}

impl RequestDescriptor {
    /// Create a descriptor from its parts.
    pub fn new(verb: Verb, url: Url, query: QueryParams) -> Self {
        Self { verb, url, query }
    }

    /// Resolve `path` against `base_url` by concatenation.
    ///
    /// A missing leading `/` on `path` is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the joined string is not a valid URL.
    pub fn resolve(verb: Verb, base_url: &str, path: &str, query: QueryParams) -> Result<Self> {
        let base = base_url.trim_end_matches('/');
        let joined = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        let url = Url::parse(&joined).map_err(|e| {
            Error::InvalidUrl(format!("Failed to construct URL from path '{path}': {e}"))
        })?;
        Ok(Self::new(verb, url, query))
    }

    /// The HTTP verb.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The target URL, without query string.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The merged query parameters.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }
}
