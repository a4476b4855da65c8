//! HTTP client and configuration.

mod auth;
mod http;

pub use auth::{authorization_header, authorization_value, Credentials};
pub use http::{ApiResponse, HttpConfig, DEFAULT_USER_AGENT};

use crate::api::{DiscussionsApi, RootApi, UsersApi};
use crate::error::{Error, Result};
use crate::models::UserId;
use http::{build_client, HttpExecutor};
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating FlarumClient.
pub struct FlarumClientBuilder {
    credentials: Option<Credentials>,
    http_config: HttpConfig,
    http_client: Option<reqwest::Client>,
}

impl std::fmt::Debug for FlarumClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlarumClientBuilder")
            .field("credentials", &self.credentials)
            .field("http_config", &self.http_config)
            .field("http_client", &self.http_client.as_ref().map(|_| "..."))
            .finish()
    }
}

impl FlarumClientBuilder {
    /// Create a new builder for the given API root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            credentials: None,
            http_config: HttpConfig::new(base_url),
            http_client: None,
        }
    }

    /// Use a forum master key.
    pub fn master_key(mut self, key: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::master_key(key));
        self
    }

    /// Use an access token issued to `user_id`.
    pub fn access_token(mut self, token: impl Into<String>, user_id: impl Into<UserId>) -> Self {
        self.credentials = Some(Credentials::access_token(token, user_id));
        self
    }

    /// Set credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set custom user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.http_config.user_agent = ua.into();
        self
    }

    /// Set connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = Some(timeout);
        self
    }

    /// Set request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = Some(timeout);
        self
    }

    /// Share an existing HTTP session instead of building one.
    ///
    /// Timeouts and user agent set on this builder do not apply to it.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build FlarumClient.
    pub fn build(self) -> Result<FlarumClient> {
        self.http_config.validate()?;

        if let Some(credentials) = &self.credentials {
            if !credentials.is_valid() {
                return Err(Error::config("stored credentials have an empty token"));
            }
        }

        let http = match self.http_client {
            Some(client) => client,
            None => build_client(&self.http_config)?,
        };

        Ok(FlarumClient {
            inner: Arc::new(FlarumClientInner {
                http,
                config: self.http_config,
                credentials: self.credentials,
            }),
        })
    }
}

/// Internal client state.
pub(crate) struct FlarumClientInner {
    pub http: reqwest::Client,
    pub config: HttpConfig,
    pub credentials: Option<Credentials>,
}

impl FlarumClientInner {
    /// Create HTTP executor.
    pub fn executor(&self) -> HttpExecutor<'_> {
        HttpExecutor::new(&self.http, &self.config)
    }

    /// Stored token and the user to act as.
    ///
    /// `acting_user` wins, then the token's own user, then `fallback`.
    pub fn stored_auth(
        &self,
        acting_user: Option<UserId>,
        fallback: Option<UserId>,
    ) -> Result<(&str, Option<UserId>)> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| Error::config("client holds no credentials"))?;

        let user = acting_user.or(credentials.user_id).or(fallback);
        Ok((credentials.token.as_str(), user))
    }

    /// Execute an unauthenticated request without a body.
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.executor()
            .send(Method::GET, path, HeaderMap::new())
            .await
    }

    /// Execute a request without a body, authenticated with `token`.
    pub async fn send_authed(
        &self,
        method: Method,
        path: &str,
        token: &str,
        user_id: Option<UserId>,
    ) -> Result<ApiResponse> {
        let headers = authorization_header(token, user_id)?;
        self.executor().send(method, path, headers).await
    }

    /// Execute a JSON request, authenticated with `token`.
    pub async fn send_json_authed<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        user_id: Option<UserId>,
        body: &B,
    ) -> Result<ApiResponse> {
        let headers = authorization_header(token, user_id)?;
        self.executor()
            .send_json(method, path, headers, body)
            .await
    }

    /// Execute an unauthenticated JSON POST.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        self.executor()
            .send_json(Method::POST, path, HeaderMap::new(), body)
            .await
    }
}

/// Flarum client for interacting with the forum.
///
/// Cloning is cheap and clones share one `reqwest::Client` connection pool.
/// The client is `Send + Sync`; concurrent calls are safe to the extent that
/// pool is, which reqwest documents as safe for concurrent use. No request is
/// made until a route method is awaited.
#[derive(Clone)]
pub struct FlarumClient {
    pub(crate) inner: Arc<FlarumClientInner>,
}

impl FlarumClient {
    /// Create a client for the API root with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder(base_url).build()
    }

    /// Create a new client builder.
    pub fn builder(base_url: impl Into<String>) -> FlarumClientBuilder {
        FlarumClientBuilder::new(base_url)
    }

    /// Get the discussions API.
    pub fn discussions(&self) -> DiscussionsApi {
        DiscussionsApi::new(self.inner.clone())
    }

    /// Get the users API.
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.inner.clone())
    }

    /// Get the forum root API.
    pub fn root(&self) -> RootApi {
        RootApi::new(self.inner.clone())
    }

    /// API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    /// Check if the client holds credentials.
    pub fn is_authenticated(&self) -> bool {
        self.inner.credentials.is_some()
    }

    /// Get the stored credentials.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.inner.credentials.as_ref()
    }

    /// Stored token and the user an authenticated call should act as.
    ///
    /// An explicit `acting_user` wins; otherwise the token's own user, then
    /// `fallback`. Fails with [`Error::InvalidConfiguration`] when the client
    /// holds no credentials.
    pub fn stored_auth(
        &self,
        acting_user: Option<UserId>,
        fallback: Option<UserId>,
    ) -> Result<(String, Option<UserId>)> {
        let (token, user) = self.inner.stored_auth(acting_user, fallback)?;
        Ok((token.to_owned(), user))
    }

    /// A client with the same session and configuration but other credentials.
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        Self {
            inner: Arc::new(FlarumClientInner {
                http: self.inner.http.clone(),
                config: self.inner.config.clone(),
                credentials: Some(credentials),
            }),
        }
    }

    /// Exchange a username/email and password for an access token.
    ///
    /// Returns a client holding the issued token. A non-2xx reply becomes
    /// [`Error::Api`](crate::Error::Api).
    pub async fn login(
        &self,
        identification: &str,
        password: &str,
        remember: bool,
    ) -> Result<Self> {
        let response = self
            .root()
            .token(identification, password)
            .remember(remember)
            .send()
            .await?
            .error_for_status()?;

        let issued: crate::models::TokenResponse = response.json()?;
        log::debug!("logged in as user {}", issued.user_id);

        Ok(self.with_credentials(Credentials::access_token(issued.token, issued.user_id)))
    }
}

impl std::fmt::Debug for FlarumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlarumClient")
            .field("authenticated", &self.is_authenticated())
            .field("base_url", &self.inner.config.base_url)
            .finish()
    }
}
