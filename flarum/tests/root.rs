//! Forum root, token and client login against a mock forum.

mod common;

use flarum::{Error, FlarumClient, UserId};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn show_returns_forum_metadata() {
    let server = MockServer::start();
    let body = json!({
        "data": {
            "type": "forums",
            "id": "1",
            "attributes": {"title": "Test Forum", "version": "1.8.0"}
        }
    });
    let mock = server.mock(|when, then| {
        when.method(Method::GET).path(common::path(""));
        then.status(200).json_body(body.clone());
    });

    let response = common::client(&server).root().show().await.unwrap();

    mock.assert();
    assert_eq!(response.into_parts(), (200, body));
}

#[tokio::test]
async fn token_posts_credentials() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST)
            .path(common::path("token"))
            .header_missing("authorization")
            .json_body(json!({
                "identification": "admin",
                "password": "secret",
                "remember": true
            }));
        then.status(200).json_body(json!({"token": "abc123", "userId": "1"}));
    });

    let response = common::client(&server)
        .root()
        .token("admin", "secret")
        .remember(true)
        .send()
        .await
        .unwrap();

    mock.assert();
    let issued: flarum::TokenResponse = response.json().unwrap();
    assert_eq!(issued.token, "abc123");
    assert_eq!(issued.user_id, UserId(1));
}

#[tokio::test]
async fn forgot_sends_email() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST)
            .path(common::path("forgot"))
            .header("authorization", "Token master; userId=1")
            .json_body(json!({"email": "alice@example.com"}));
        then.status(204);
    });

    let response = common::client(&server)
        .root()
        .forgot("master", "alice@example.com", 1u64)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.status.as_u16(), 204);
}

#[tokio::test]
async fn forgot_after_login_uses_issued_token() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::POST).path(common::path("token"));
        then.status(200).json_body(json!({"token": "issued", "userId": 7}));
    });
    let forgot = server.mock(|when, then| {
        when.method(Method::POST)
            .path(common::path("forgot"))
            .header("authorization", "Token issued; userId=7")
            .json_body(json!({"email": "alice@example.com"}));
        then.status(204);
    });

    let session = common::client(&server)
        .login("alice", "pw", false)
        .await
        .unwrap();
    let response = session
        .root()
        .forgot_as("alice@example.com", None)
        .await
        .unwrap();

    forgot.assert();
    assert_eq!(response.status.as_u16(), 204);
}

#[tokio::test]
async fn forgot_with_master_key_acts_as_default_user() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST)
            .path(common::path("forgot"))
            .header("authorization", "Token master; userId=1");
        then.status(204);
    });

    let client = FlarumClient::builder(server.url(common::API_ROOT))
        .master_key("master")
        .build()
        .unwrap();
    client
        .root()
        .forgot_as("bob@example.com", None)
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn forgot_without_stored_credentials_sends_nothing() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST);
        then.status(204);
    });

    let err = common::client(&server)
        .root()
        .forgot_as("bob@example.com", Some(UserId(3)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidConfiguration(_)));
    mock.assert_calls(0);
}

#[tokio::test]
async fn login_stores_access_token() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::POST).path(common::path("token"));
        then.status(200).json_body(json!({"token": "sess", "userId": 7}));
    });

    let client = common::client(&server);
    let logged_in = client.login("alice", "pw", false).await.unwrap();

    assert!(!client.is_authenticated());
    let creds = logged_in.credentials().unwrap();
    assert_eq!(creds.token, "sess");
    assert_eq!(creds.user_id, Some(UserId(7)));
}

#[tokio::test]
async fn login_rejection_is_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::POST).path(common::path("token"));
        then.status(401)
            .json_body(json!({"errors": [{"status": "401", "code": "not_authenticated"}]}));
    });

    let err = common::client(&server)
        .login("alice", "wrong", false)
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    match err {
        Error::Api { errors, .. } => assert_eq!(errors[0]["code"], "not_authenticated"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn transport_errors_surface_as_network() {
    let client = FlarumClient::new("http://127.0.0.1:1/api").unwrap();

    let err = client.root().show().await.unwrap_err();

    assert!(matches!(err, Error::Network(_)));
}
