//! HTTP client configuration and request execution.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Default user agent.
pub const DEFAULT_USER_AGENT: &str = concat!("flarum-rs/", env!("CARGO_PKG_VERSION"));

/// Media types accepted from the forum.
const ACCEPT_JSON: &str = "application/vnd.api+json, application/json";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// API root, e.g. `https://forum.example.com/api`.
    pub base_url: String,
    /// Connection timeout. Transport default when unset.
    pub connect_timeout: Option<Duration>,
    /// Whole-request timeout. Transport default when unset.
    pub timeout: Option<Duration>,
    /// User agent.
    pub user_agent: String,
}

impl HttpConfig {
    /// Configuration for an API root with transport defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: None,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Check that the base URL parses, uses http or https, and is a bare
    /// path that routes can be appended to.
    pub fn validate(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid base url '{}': {e}", self.base_url)))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::config(format!(
                    "base url must use http or https, got '{other}'"
                )))
            }
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(Error::config(format!(
                "base url must not carry a query or fragment: '{}'",
                self.base_url
            )));
        }

        Ok(url)
    }

    /// Append a path to the API root.
    ///
    /// Plain concatenation keeps any path the root already has (`/api`).
    pub fn resolve_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_owned()
        } else {
            format!("{base}/{path}")
        }
    }
}

/// Build a reqwest client with the given configuration.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.as_str()).gzip(true);

    if let Some(timeout) = config.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(Error::Network)
}

/// Status code and parsed body of a forum reply.
///
/// Non-success statuses are returned as-is; nothing in the body is rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when the body was empty.
    pub body: Value,
}

impl ApiResponse {
    /// Create a response.
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Split into `(status, body)`.
    pub fn into_parts(self) -> (u16, Value) {
        (self.status.as_u16(), self.body)
    }

    /// Deserialize the body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&self.body).map_err(Error::Json)
    }

    /// JSON:API error objects in the body, if any.
    pub fn errors(&self) -> &[Value] {
        self.body
            .get("errors")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Turn a non-2xx response into [`Error::Api`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }

        Err(Error::Api {
            status: self.status,
            errors: self.errors().to_vec(),
        })
    }
}

/// HTTP request executor.
pub struct HttpExecutor<'a> {
    client: &'a Client,
    config: &'a HttpConfig,
}

impl<'a> HttpExecutor<'a> {
    /// Create a new executor.
    pub fn new(client: &'a Client, config: &'a HttpConfig) -> Self {
        Self { client, config }
    }

    /// Build a request with common headers.
    fn build_request(&self, method: Method, path: &str, headers: HeaderMap) -> RequestBuilder {
        let url = self.config.resolve_url(path);

        self.client
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static(ACCEPT_JSON))
            .headers(headers)
    }

    /// Execute a request without a body.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
    ) -> Result<ApiResponse> {
        let request = self.build_request(method.clone(), path, headers);
        self.execute(method, path, request).await
    }

    /// Execute a request with a JSON body.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: &B,
    ) -> Result<ApiResponse> {
        let request = self.build_request(method.clone(), path, headers).json(body);
        self.execute(method, path, request).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<ApiResponse> {
        log::debug!("{} {}", method, self.config.resolve_url(path));

        let response = request.send().await.map_err(Error::Network)?;
        let response = handle_response(response).await?;

        log::debug!("{} {} -> {}", method, path, response.status);
        Ok(response)
    }
}

/// Read the body and parse it as JSON, keeping the status.
async fn handle_response(response: Response) -> Result<ApiResponse> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(Error::Network)?;

    parse_body(status, &bytes).map(|body| ApiResponse::new(status, body))
}

fn parse_body(status: StatusCode, bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(bytes).map_err(|_| Error::UnexpectedBody {
        status,
        body: String::from_utf8_lossy(bytes).into_owned(),
    })
}
