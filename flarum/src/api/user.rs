//! Users API.

use std::sync::Arc;

use reqwest::Method;
use serde_json::{Map, Value};

use crate::{
    client::{ApiResponse, FlarumClientInner},
    error::Result,
    models::{Document, NewUser, Resource, UserId, USERS},
};

/// API for user operations, rooted at `/users`.
///
/// Every mutating call is authenticated. Calls that act on a single account
/// send the token without a `userId`, the same way a profile edit does.
pub struct UsersApi {
    client: Arc<FlarumClientInner>,
}

impl UsersApi {
    pub(crate) fn new(client: Arc<FlarumClientInner>) -> Self {
        Self { client }
    }

    /// List users.
    pub async fn index(&self, token: &str, acting_user: impl Into<UserId>) -> Result<ApiResponse> {
        self.client
            .send_authed(Method::GET, USERS, token, Some(acting_user.into()))
            .await
    }

    /// Register a user.
    pub fn create(
        &self,
        token: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> CreateUserBuilder {
        CreateUserBuilder {
            client: self.client.clone(),
            token: token.into(),
            acting_user: None,
            user: NewUser {
                username: username.into(),
                email: email.into(),
                password: password.into(),
                is_email_confirmed: false,
            },
        }
    }

    /// Get a single user.
    pub async fn show(&self, user_id: impl Into<UserId>) -> Result<ApiResponse> {
        let path = user_path(user_id.into());
        self.client.get(&path).await
    }

    /// Edit a user with raw attribute and relationship fragments.
    pub fn update(
        &self,
        user_id: impl Into<UserId>,
        token: impl Into<String>,
    ) -> UpdateUserBuilder {
        UpdateUserBuilder {
            client: self.client.clone(),
            token: token.into(),
            user_id: user_id.into(),
            attributes: Map::new(),
            relationships: Map::new(),
        }
    }

    /// Delete a user.
    pub async fn delete(&self, token: &str, user_id: impl Into<UserId>) -> Result<ApiResponse> {
        let path = user_path(user_id.into());
        self.client
            .send_authed(Method::DELETE, &path, token, None)
            .await
    }

    /// Upload avatar.
    pub async fn upload_avatar(
        &self,
        token: &str,
        user_id: impl Into<UserId>,
    ) -> Result<ApiResponse> {
        let path = avatar_path(user_id.into());
        self.client
            .send_authed(Method::POST, &path, token, None)
            .await
    }

    /// Delete avatar.
    pub async fn delete_avatar(
        &self,
        token: &str,
        user_id: impl Into<UserId>,
    ) -> Result<ApiResponse> {
        let path = avatar_path(user_id.into());
        self.client
            .send_authed(Method::DELETE, &path, token, None)
            .await
    }

    /// Send confirmation email.
    pub async fn send_confirmation_email(
        &self,
        token: &str,
        user_id: impl Into<UserId>,
    ) -> Result<ApiResponse> {
        let path = user_path(user_id.into());
        self.client
            .send_authed(Method::POST, &path, token, None)
            .await
    }
}

fn user_path(id: UserId) -> String {
    format!("{USERS}/{id}")
}

fn avatar_path(id: UserId) -> String {
    format!("{USERS}/{id}/avatar")
}

/// Builder for user registration.
pub struct CreateUserBuilder {
    client: Arc<FlarumClientInner>,
    token: String,
    acting_user: Option<UserId>,
    user: NewUser,
}

impl CreateUserBuilder {
    /// User to act as. Needed when the token is a master key.
    pub fn acting_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.acting_user = Some(user_id.into());
        self
    }

    /// Mark the email as confirmed without sending a confirmation mail.
    pub fn email_confirmed(mut self, confirmed: bool) -> Self {
        self.user.is_email_confirmed = confirmed;
        self
    }

    /// Request document this builder sends.
    pub fn document(&self) -> Document<NewUser> {
        Document::new(Resource::new(USERS, self.user.clone()))
    }

    /// Execute the request.
    pub async fn send(self) -> Result<ApiResponse> {
        let document = self.document();
        self.client
            .send_json_authed(Method::POST, USERS, &self.token, self.acting_user, &document)
            .await
    }
}

/// Builder for user edits. Fragments are sent exactly as given.
pub struct UpdateUserBuilder {
    client: Arc<FlarumClientInner>,
    token: String,
    user_id: UserId,
    attributes: Map<String, Value>,
    relationships: Map<String, Value>,
}

impl UpdateUserBuilder {
    /// Replace the attributes fragment.
    pub fn attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set one attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replace the relationships fragment.
    pub fn relationships(mut self, relationships: Map<String, Value>) -> Self {
        self.relationships = relationships;
        self
    }

    /// Request document this builder sends.
    pub fn document(&self) -> Document<Map<String, Value>> {
        Document::new(
            Resource::new(USERS, self.attributes.clone())
                .with_id(self.user_id)
                .with_relationships(self.relationships.clone()),
        )
    }

    /// Execute the request.
    pub async fn send(self) -> Result<ApiResponse> {
        let document = self.document();
        let path = user_path(self.user_id);
        self.client
            .send_json_authed(Method::PATCH, &path, &self.token, None, &document)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlarumClient;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn api() -> UsersApi {
        FlarumClient::new("http://localhost/api").unwrap().users()
    }

    #[test]
    fn test_paths() {
        assert_eq!(user_path(UserId(3)), "users/3");
        assert_eq!(avatar_path(UserId(3)), "users/3/avatar");
    }

    #[test]
    fn test_create_document() {
        let builder = api()
            .create("token", "bob", "bob@example.com", "s3cret")
            .email_confirmed(true);

        assert_eq!(
            serde_json::to_value(builder.document()).unwrap(),
            json!({
                "data": {
                    "type": "users",
                    "attributes": {
                        "username": "bob",
                        "email": "bob@example.com",
                        "password": "s3cret",
                        "isEmailConfirmed": true
                    }
                }
            })
        );
    }

    #[test]
    fn test_update_passthrough() {
        let mut groups = Map::new();
        groups.insert("groups".into(), json!({"data": [{"type": "groups", "id": "4"}]}));

        let builder = api()
            .update(8u64, "token")
            .attribute("username", "robert")
            .attribute("isEmailConfirmed", true)
            .relationships(groups);

        assert_eq!(
            serde_json::to_value(builder.document()).unwrap(),
            json!({
                "data": {
                    "type": "users",
                    "id": "8",
                    "attributes": {"username": "robert", "isEmailConfirmed": true},
                    "relationships": {"groups": {"data": [{"type": "groups", "id": "4"}]}}
                }
            })
        );
    }

    #[test]
    fn test_update_defaults_to_empty_fragments() {
        let doc = serde_json::to_value(api().update(8u64, "token").document()).unwrap();
        assert_eq!(doc["data"]["attributes"], json!({}));
        assert_eq!(doc["data"]["relationships"], json!({}));
    }
}
