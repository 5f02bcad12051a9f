//! Main client implementation for the Trello API

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use trellis_core::retry::BackoffStrategy;

use crate::{
    DEFAULT_BASE_URL,
    auth::Credentials,
    config::ClientConfig,
    error::{Error, Result},
    http::{Executor, RequestDescriptor, Transport, Verb, merge_query},
    resources::{Boards, Cards, Lists, Members},
    types::{Board, Card, Checklist, Comment, List, Token},
};

/// Extra query parameters for a request, as a JSON object.
pub type Options = Map<String, Value>;

/// Fixed query parameter the comment listings add.
const COMMENT_FILTER: (&str, &str) = ("filter", "commentCard");

/// Main client for interacting with the Trello API.
///
/// Every request carries the key/token pair as query parameters. Requests
/// answered with HTTP 429 are retried after a random delay until the API
/// answers with something else.
///
/// # Example
///
/// ```rust,no_run
/// use trellis::Client;
///
/// let client = Client::new("api-key", "user-token");
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    executor: Executor,
    credentials: Credentials,
    base_url: String,
}

impl Client {
    /// Create a new client with an API key and token.
    ///
    /// # Panics
    ///
    /// This convenience method panics if the client cannot be built with the
    /// default configuration. For fallible construction use
    /// [`Client::try_new()`] instead.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use trellis::Client;
    ///
    /// let client = Client::new("api-key", "user-token");
    /// ```
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self::try_new(api_key, token).expect("Failed to build client with provided credentials")
    }

    /// Create a new client with an API key and token (fallible version).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is invalid (e.g., from `TRELLO_BASE_URL`)
    /// - HTTP client configuration fails
    pub fn try_new(api_key: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).token(token).build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    ///
    /// With the `env` feature, missing credentials are read from
    /// `TRELLO_API_KEY` and `TRELLO_TOKEN`.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        ClientBuilder {
            config,
            ..Default::default()
        }
        .build()
    }

    /// Create a client that issues attempts through a custom transport.
    ///
    /// The base URL is [`DEFAULT_BASE_URL`] and rate-limit retries use the
    /// default window.
    pub fn from_transport(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self::assemble(
            Executor::new(transport),
            credentials,
            DEFAULT_BASE_URL.to_string(),
        )
    }

    fn assemble(executor: Executor, credentials: Credentials, base_url: String) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                executor,
                credentials,
                base_url,
            }),
        }
    }

    /// The base URL paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Validate a call and build its request, without any I/O.
    ///
    /// `options`, if supplied, must be a JSON object; its entries become
    /// query parameters, with the credential pair written last.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `options` is not an object
    /// - [`Error::UnsupportedMethod`] if `method` is not one of POST, GET,
    ///   PUT or DELETE, in any letter case
    /// - [`Error::InvalidUrl`] if `path` does not form a valid URL
    pub fn prepare(
        &self,
        method: &str,
        path: &str,
        options: Option<&Value>,
    ) -> Result<RequestDescriptor> {
        let options = match options {
            None => None,
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                return Err(Error::InvalidArgument(format!(
                    "options must be a JSON object, got {}",
                    json_kind(other)
                )));
            }
        };
        let verb: Verb = method.parse()?;
        self.descriptor(verb, path, options, &[])
    }

    /// Send a request to any Trello endpoint.
    ///
    /// Returns the decoded JSON body of the first answer that is not a 429.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use trellis::Client;
    /// # use serde_json::json;
    /// # async fn example(client: Client) -> trellis::Result<()> {
    /// let card = client
    ///     .request("post", "/1/cards", Some(json!({"idList": "5abc", "name": "Hello"})))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Validation errors from [`Client::prepare`] are returned before any
    /// request is sent. After that, the terminal transport error is returned
    /// unmodified.
    pub async fn request(&self, method: &str, path: &str, options: Option<Value>) -> Result<Value> {
        let request = self.prepare(method, path, options.as_ref())?;
        self.inner.executor.execute(&request).await
    }

    fn descriptor(
        &self,
        verb: Verb,
        path: &str,
        options: Option<&Options>,
        fixed: &[(&str, &str)],
    ) -> Result<RequestDescriptor> {
        let query = merge_query(options, fixed, &self.inner.credentials);
        RequestDescriptor::resolve(verb, &self.inner.base_url, path, query)
    }

    /// GET `path` and decode the payload into `T`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: Option<Options>,
        fixed: &[(&str, &str)],
    ) -> Result<T> {
        let request = self.descriptor(Verb::Get, path, options.as_ref(), fixed)?;
        let payload = self.inner.executor.execute(&request).await?;
        serde_json::from_value(payload)
            .map_err(|e| Error::from(e).context(format!("decoding response of {path}")))
    }

    /// List the API tokens a member has granted.
    pub async fn get_tokens(&self, member_id: &str, options: Option<Options>) -> Result<Vec<Token>> {
        self.fetch(&format!("/1/members/{member_id}/tokens"), options, &[])
            .await
    }

    /// List the boards a member belongs to.
    ///
    /// `"me"` refers to the member owning the token.
    pub async fn get_boards(&self, member_id: &str, options: Option<Options>) -> Result<Vec<Board>> {
        self.fetch(&format!("/1/members/{member_id}/boards"), options, &[])
            .await
    }

    /// List the lists on a board.
    pub async fn get_lists(&self, board_id: &str, options: Option<Options>) -> Result<Vec<List>> {
        self.fetch(&format!("/1/boards/{board_id}/lists"), options, &[])
            .await
    }

    /// List the cards on a board.
    pub async fn get_cards(&self, board_id: &str, options: Option<Options>) -> Result<Vec<Card>> {
        self.fetch(&format!("/1/boards/{board_id}/cards"), options, &[])
            .await
    }

    /// List the cards in a list.
    pub async fn get_cards_on_list(
        &self,
        list_id: &str,
        options: Option<Options>,
    ) -> Result<Vec<Card>> {
        self.fetch(&format!("/1/lists/{list_id}/cards"), options, &[])
            .await
    }

    /// List the checklists on a board.
    pub async fn get_checklists(
        &self,
        board_id: &str,
        options: Option<Options>,
    ) -> Result<Vec<Checklist>> {
        self.fetch(&format!("/1/boards/{board_id}/checklists"), options, &[])
            .await
    }

    /// List the checklists on a card.
    pub async fn get_checklists_on_card(
        &self,
        card_id: &str,
        options: Option<Options>,
    ) -> Result<Vec<Checklist>> {
        self.fetch(&format!("/1/cards/{card_id}/checklists"), options, &[])
            .await
    }

    /// List the comments on all cards of a board.
    ///
    /// Sends `filter=commentCard`, overriding any `filter` in `options`.
    pub async fn get_comments(
        &self,
        board_id: &str,
        options: Option<Options>,
    ) -> Result<Vec<Comment>> {
        self.fetch(
            &format!("/1/boards/{board_id}/actions"),
            options,
            &[COMMENT_FILTER],
        )
        .await
    }

    /// List the comments on a card.
    ///
    /// Sends `filter=commentCard`, overriding any `filter` in `options`.
    pub async fn get_comments_on_card(
        &self,
        card_id: &str,
        options: Option<Options>,
    ) -> Result<Vec<Comment>> {
        self.fetch(
            &format!("/1/cards/{card_id}/actions"),
            options,
            &[COMMENT_FILTER],
        )
        .await
    }

    /// Access member endpoints.
    pub fn members(&self) -> Members {
        Members::new(self.clone())
    }

    /// Access board endpoints.
    pub fn boards(&self) -> Boards {
        Boards::new(self.clone())
    }

    /// Access list endpoints.
    pub fn lists(&self) -> Lists {
        Lists::new(self.clone())
    }

    /// Access card endpoints.
    pub fn cards(&self) -> Cards {
        Cards::new(self.clone())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn validate_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
    }
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| Error::InvalidUrl(format!("Invalid base URL '{trimmed}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "Unsupported URL scheme '{}': only http and https are allowed",
            parsed.scheme()
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Builder for creating a configured Client.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    backoff: Option<Arc<dyn BackoffStrategy>>,
}

impl ClientBuilder {
    /// Set the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::new(api_key.into().into_boxed_str()));
        self
    }

    /// Set the user token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(SecretString::new(token.into().into_boxed_str()));
        self
    }

    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the timeout for a single HTTP attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Route all traffic through a proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Set the window rate-limit delays are drawn from, `[min, max)`.
    pub fn retry_delay(mut self, min: Duration, max: Duration) -> Self {
        self.config.rate_limit.min_delay = min;
        self.config.rate_limit.max_delay = max;
        self
    }

    /// Give up after `max_attempts` attempts that were all rate limited.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.rate_limit.max_attempts = Some(max_attempts);
        self
    }

    /// Issue attempts through a custom transport.
    ///
    /// Timeout, user agent and proxy settings are ignored when set.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom backoff strategy for rate-limited attempts.
    ///
    /// Replaces [`retry_delay`](Self::retry_delay) and
    /// [`max_attempts`](Self::max_attempts).
    pub fn backoff(mut self, backoff: Arc<dyn BackoffStrategy>) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Build the client with the configured options.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingConfig`] if the key or token is missing
    /// - [`Error::InvalidUrl`] if the base URL is empty, malformed or not
    ///   http(s)
    /// - [`Error::Backoff`] if the retry window is empty or the attempt
    ///   ceiling is zero
    /// - [`Error::HttpClient`] if the default transport cannot be built
    pub fn build(self) -> Result<Client> {
        #[cfg(feature = "env")]
        let config = if self.config.api_key.is_none() || self.config.token.is_none() {
            ClientConfig::from_env()?.merge(self.config)
        } else {
            self.config
        };
        #[cfg(not(feature = "env"))]
        let config = self.config;

        let (Some(api_key), Some(token)) = (config.api_key.clone(), config.token.clone()) else {
            return Err(Error::MissingConfig(
                "API key and token are required (set TRELLO_API_KEY and TRELLO_TOKEN)".to_string(),
            ));
        };
        let credentials = Credentials::from_secrets(api_key, token);

        let base_url = validate_base_url(config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(config.build_transport()?),
        };
        let backoff = match self.backoff {
            Some(backoff) => backoff,
            None => Arc::new(config.rate_limit.to_backoff()?),
        };

        tracing::debug!(
            base_url = %base_url,
            transport = transport.name(),
            "Built Trello client"
        );

        Ok(Client::assemble(
            Executor::with_backoff(transport, backoff),
            credentials,
            base_url,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::ScriptedTransport;
    use crate::http::{Completion, StatusCode};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn client_with(transport: &Arc<ScriptedTransport>) -> Client {
        Client::builder()
            .api_key("test-key")
            .token("test-token")
            .transport(transport.clone())
            .build()
            .unwrap()
    }

    fn ok(body: Value) -> Completion {
        Completion::success(StatusCode::OK, body)
    }

    #[test]
    fn test_client_builder() {
        let client = Client::builder()
            .api_key("test-key")
            .token("test-token")
            .base_url("https://example.com/")
            .timeout(Duration::from_secs(30))
            .retry_delay(Duration::from_millis(10), Duration::from_millis(20))
            .max_attempts(3)
            .build();

        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "https://example.com");
    }

    #[test]
    fn test_client_new_uses_default_base_url() {
        let client = Client::new("test-key", "test-token");
        assert_eq!(client.base_url(), "https://api.trello.com");
    }

    #[rstest]
    #[case("ftp://invalid.example.com", "ftp")]
    #[case("   ", "empty")]
    #[case("not a url", "Invalid base URL")]
    fn test_builder_rejects_bad_base_url(#[case] base_url: &str, #[case] needle: &str) {
        let result = Client::builder()
            .api_key("k")
            .token("t")
            .base_url(base_url)
            .build();
        assert_matches!(result, Err(Error::InvalidUrl(msg)) if msg.contains(needle));
    }

    #[test]
    fn test_builder_rejects_empty_retry_window() {
        let result = Client::builder()
            .api_key("k")
            .token("t")
            .retry_delay(Duration::from_millis(50), Duration::from_millis(50))
            .build();
        assert_matches!(result, Err(Error::Backoff(_)));
    }

    #[test]
    fn test_builder_requires_credentials() {
        temp_env::with_vars_unset(["TRELLO_API_KEY", "TRELLO_TOKEN"], || {
            let result = Client::builder().api_key("only-key").build();
            assert_matches!(result, Err(Error::MissingConfig(_)));
        });
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_builder_falls_back_to_env_credentials() {
        temp_env::with_vars(
            [
                ("TRELLO_API_KEY", Some("env-key")),
                ("TRELLO_TOKEN", Some("env-token")),
                ("TRELLO_BASE_URL", None),
            ],
            || {
                let client = Client::builder().build().unwrap();
                assert_eq!(client.base_url(), DEFAULT_BASE_URL);
            },
        );
    }

    #[rstest]
    #[case("get", Verb::Get)]
    #[case("GET", Verb::Get)]
    #[case("Post", Verb::Post)]
    #[case("pUt", Verb::Put)]
    #[case("DELETE", Verb::Delete)]
    #[tokio::test]
    async fn test_request_dispatches_verb(#[case] method: &str, #[case] verb: Verb) {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(json!({"ok": true}))]));
        let client = client_with(&transport);

        let payload = client.request(method, "/1/cards/x", None).await.unwrap();

        assert_eq!(payload, json!({"ok": true}));
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].request.verb(), verb);
        assert_eq!(
            calls[0].request.url().as_str(),
            "https://api.trello.com/1/cards/x"
        );
    }

    #[rstest]
    #[case("PATCH")]
    #[case("HEAD")]
    #[case("")]
    #[case("gett")]
    #[tokio::test]
    async fn test_unsupported_method_sends_nothing(#[case] method: &str) {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let client = client_with(&transport);

        let result = client.request(method, "/1/cards/x", None).await;

        assert_matches!(result, Err(Error::UnsupportedMethod(name)) if name == method);
        assert_eq!(transport.attempts(), 0);
    }

    #[rstest]
    #[case(json!("filter=all"))]
    #[case(json!(42))]
    #[case(json!(true))]
    #[case(json!(["a", "b"]))]
    #[case(Value::Null)]
    #[tokio::test]
    async fn test_non_object_options_send_nothing(#[case] options: Value) {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let client = client_with(&transport);

        let result = client.request("get", "/1/boards/b1", Some(options)).await;

        assert_matches!(result, Err(Error::InvalidArgument(_)));
        assert_eq!(transport.attempts(), 0);
    }

    #[test]
    fn test_prepare_validates_options_before_method() {
        let client = Client::new("k", "t");
        let result = client.prepare("PATCH", "/1/x", Some(&json!(1)));
        assert_matches!(result, Err(Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_credentials_override_options() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(json!([]))]));
        let client = client_with(&transport);

        client
            .request(
                "get",
                "/1/boards/b1/cards",
                Some(json!({"key": "forged", "token": "forged", "fields": ["name", "due"]})),
            )
            .await
            .unwrap();

        let calls = transport.calls();
        let query = calls[0].request.query();
        assert_eq!(query.get("key"), Some("test-key"));
        assert_eq!(query.get("token"), Some("test-token"));
        assert_eq!(query.get("fields"), Some("name,due"));
    }

    #[tokio::test]
    async fn test_get_boards_sends_credentials_only() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(json!([{"id": "b1"}]))]));
        let client = client_with(&transport);

        let boards = client.get_boards("member123", None).await.unwrap();

        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].id, "b1");

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        let request = &calls[0].request;
        assert_eq!(request.verb(), Verb::Get);
        assert_eq!(
            request.url().as_str(),
            "https://api.trello.com/1/members/member123/boards"
        );
        let params: Vec<_> = request.query().iter().collect();
        assert_eq!(params, vec![("key", "test-key"), ("token", "test-token")]);
    }

    #[tokio::test]
    async fn test_get_comments_adds_filter() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(json!([]))]));
        let client = client_with(&transport);

        let mut options = Options::new();
        options.insert("filter".into(), json!("all"));
        options.insert("limit".into(), json!(10));
        client.get_comments("board1", Some(options)).await.unwrap();

        let calls = transport.calls();
        let request = &calls[0].request;
        assert_eq!(
            request.url().as_str(),
            "https://api.trello.com/1/boards/board1/actions"
        );
        assert_eq!(request.query().get("filter"), Some("commentCard"));
        assert_eq!(request.query().get("limit"), Some("10"));
        assert_eq!(request.query().get("key"), Some("test-key"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_retries_through_rate_limit() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Completion::rate_limited(),
            ok(json!({"ok": true})),
        ]));
        let client = client_with(&transport);

        let payload = client.request("GET", "/1/anything", None).await.unwrap();

        assert_eq!(payload, json!({"ok": true}));
        assert_eq!(transport.attempts(), 2);
    }

    #[tokio::test]
    async fn test_typed_decode_failure_is_serialization_error() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(json!({"not": "a list"}))]));
        let client = client_with(&transport);

        let err = client.get_lists("b1", None).await.unwrap_err();

        assert!(err.to_string().contains("/1/boards/b1/lists"));
        assert_matches!(err, Error::WithContext { .. });
    }

    #[tokio::test]
    async fn test_convenience_paths() {
        let transport = Arc::new(ScriptedTransport::new(
            (0..9).map(|_| ok(json!([]))).collect(),
        ));
        let client = client_with(&transport);

        client.get_tokens("m", None).await.unwrap();
        client.get_boards("m", None).await.unwrap();
        client.get_lists("b", None).await.unwrap();
        client.get_cards("b", None).await.unwrap();
        client.get_cards_on_list("l", None).await.unwrap();
        client.get_checklists("b", None).await.unwrap();
        client.get_checklists_on_card("c", None).await.unwrap();
        client.get_comments("b", None).await.unwrap();
        client.get_comments_on_card("c", None).await.unwrap();

        let paths: Vec<String> = transport
            .calls()
            .iter()
            .map(|call| call.request.url().path().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "/1/members/m/tokens",
                "/1/members/m/boards",
                "/1/boards/b/lists",
                "/1/boards/b/cards",
                "/1/lists/l/cards",
                "/1/boards/b/checklists",
                "/1/cards/c/checklists",
                "/1/boards/b/actions",
                "/1/cards/c/actions",
            ]
        );
    }
}
