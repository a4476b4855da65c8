//! Authentication payloads.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Body of `POST /token`.
#[derive(Clone, Serialize)]
pub struct TokenRequest {
    pub identification: String,
    pub password: String,
    pub remember: bool,
}

impl std::fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("identification", &self.identification)
            .field("remember", &self.remember)
            .finish_non_exhaustive()
    }
}

/// Successful reply of `POST /token`.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub user_id: UserId,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /forgot`.
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPassword {
    pub email: String,
}
