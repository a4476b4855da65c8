//! Credentials and the `Authorization` header.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::error::{Error, Result};
use crate::models::UserId;

/// Credentials stored on a client.
///
/// A master key carries no user id: calls made with it name the acting user
/// explicitly. An access token is bound to the user it was issued for.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API key or access token.
    pub token: String,
    /// User the token belongs to, if any.
    pub user_id: Option<UserId>,
}

impl Credentials {
    /// Forum-wide API key allowing impersonation.
    pub fn master_key(key: impl Into<String>) -> Self {
        Self {
            token: key.into(),
            user_id: None,
        }
    }

    /// Session token obtained from the token endpoint.
    pub fn access_token(token: impl Into<String>, user_id: impl Into<UserId>) -> Self {
        Self {
            token: token.into(),
            user_id: Some(user_id.into()),
        }
    }

    /// Whether this is a master key rather than a user-bound token.
    pub fn is_master_key(&self) -> bool {
        self.user_id.is_none()
    }

    /// Check if credentials look usable.
    pub fn is_valid(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"***")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Render the header value: `Token <token>; userId=<id>`.
///
/// Without a user id the `; userId=` fragment is left out entirely.
pub fn authorization_value(token: &str, user_id: Option<UserId>) -> String {
    match user_id {
        Some(id) => format!("Token {token}; userId={id}"),
        None => format!("Token {token}"),
    }
}

/// Build the single-entry header map for an authenticated request.
pub fn authorization_header(token: &str, user_id: Option<UserId>) -> Result<HeaderMap> {
    if token.trim().is_empty() {
        return Err(Error::invalid("token must not be empty"));
    }

    let mut value = HeaderValue::from_str(&authorization_value(token, user_id))
        .map_err(|_| Error::invalid("token contains characters not allowed in a header"))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::with_capacity(1);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}
