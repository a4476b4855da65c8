//! Forum root API: metadata and authentication.

use std::sync::Arc;

use reqwest::Method;

use super::DEFAULT_ACTING_USER;
use crate::{
    client::{ApiResponse, FlarumClientInner},
    error::Result,
    models::{ForgotPassword, TokenRequest, UserId},
};

/// API for the forum root.
pub struct RootApi {
    client: Arc<FlarumClientInner>,
}

impl RootApi {
    pub(crate) fn new(client: Arc<FlarumClientInner>) -> Self {
        Self { client }
    }

    /// Get forum information: title, version, enabled features.
    pub async fn show(&self) -> Result<ApiResponse> {
        self.client.get("").await
    }

    /// Request an access token.
    pub fn token(
        &self,
        identification: impl Into<String>,
        password: impl Into<String>,
    ) -> TokenBuilder {
        TokenBuilder {
            client: self.client.clone(),
            request: TokenRequest {
                identification: identification.into(),
                password: password.into(),
                remember: false,
            },
        }
    }

    /// Send a password reset email.
    pub async fn forgot(
        &self,
        token: &str,
        email: impl Into<String>,
        acting_user: impl Into<UserId>,
    ) -> Result<ApiResponse> {
        let body = ForgotPassword {
            email: email.into(),
        };
        self.client
            .send_json_authed(Method::POST, "forgot", token, Some(acting_user.into()), &body)
            .await
    }

    /// Send a password reset email using the client's stored credentials.
    ///
    /// Acts as `acting_user` when given, otherwise as the stored token's own
    /// user, otherwise as [`DEFAULT_ACTING_USER`].
    pub async fn forgot_as(
        &self,
        email: impl Into<String>,
        acting_user: Option<UserId>,
    ) -> Result<ApiResponse> {
        let (token, user) = self
            .client
            .stored_auth(acting_user, Some(DEFAULT_ACTING_USER))?;
        let body = ForgotPassword {
            email: email.into(),
        };
        self.client
            .send_json_authed(Method::POST, "forgot", token, user, &body)
            .await
    }
}

/// Builder for token requests.
pub struct TokenBuilder {
    client: Arc<FlarumClientInner>,
    request: TokenRequest,
}

impl TokenBuilder {
    /// Ask for a long-lived session.
    pub fn remember(mut self, remember: bool) -> Self {
        self.request.remember = remember;
        self
    }

    /// Execute the request.
    pub async fn send(self) -> Result<ApiResponse> {
        self.client.post_json("token", &self.request).await
    }
}
