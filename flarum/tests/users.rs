//! User routes against a mock forum.

mod common;

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Map};

#[tokio::test]
async fn index_is_authenticated() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::GET)
            .path(common::path("users"))
            .header("authorization", "Token master; userId=1");
        then.status(200).json_body(json!({"data": []}));
    });

    let response = common::client(&server)
        .users()
        .index("master", 1u64)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.into_parts(), (200, json!({"data": []})));
}

#[tokio::test]
async fn create_without_acting_user_omits_user_id() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST)
            .path(common::path("users"))
            .header("authorization", "Token personal-token")
            .json_body(json!({
                "data": {
                    "type": "users",
                    "attributes": {
                        "username": "alice",
                        "email": "alice@example.com",
                        "password": "hunter22",
                        "isEmailConfirmed": false
                    }
                }
            }));
        then.status(201)
            .json_body(json!({"data": {"type": "users", "id": "10"}}));
    });

    let response = common::client(&server)
        .users()
        .create("personal-token", "alice", "alice@example.com", "hunter22")
        .send()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.body["data"]["id"], "10");
}

#[tokio::test]
async fn create_with_master_key_impersonates() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST)
            .path(common::path("users"))
            .header("authorization", "Token master; userId=1")
            .json_body(json!({
                "data": {
                    "type": "users",
                    "attributes": {
                        "username": "bob",
                        "email": "bob@example.com",
                        "password": "pw123456",
                        "isEmailConfirmed": true
                    }
                }
            }));
        then.status(201).json_body(json!({"data": {"type": "users", "id": "11"}}));
    });

    common::client(&server)
        .users()
        .create("master", "bob", "bob@example.com", "pw123456")
        .acting_user(1u64)
        .email_confirmed(true)
        .send()
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn show_is_unauthenticated() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::GET)
            .path(common::path("users/2"))
            .header_missing("authorization");
        then.status(404)
            .json_body(json!({"errors": [{"status": "404", "code": "not_found"}]}));
    });

    let response = common::client(&server).users().show(2u64).await.unwrap();

    mock.assert();
    assert_eq!(response.status.as_u16(), 404);
    assert_eq!(response.errors()[0]["code"], "not_found");
}

#[tokio::test]
async fn update_passes_fragments_through() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::PATCH)
            .path(common::path("users/2"))
            .header("authorization", "Token tok")
            .json_body(json!({
                "data": {
                    "type": "users",
                    "id": "2",
                    "attributes": {"bio": "hello"},
                    "relationships": {}
                }
            }));
        then.status(200).json_body(json!({"data": {"type": "users", "id": "2"}}));
    });

    let mut attributes = Map::new();
    attributes.insert("bio".into(), json!("hello"));

    common::client(&server)
        .users()
        .update(2u64, "tok")
        .attributes(attributes)
        .send()
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn account_actions_are_authenticated() {
    let server = MockServer::start();
    let delete = server.mock(|when, then| {
        when.method(Method::DELETE)
            .path(common::path("users/2"))
            .header("authorization", "Token tok");
        then.status(204);
    });
    let upload = server.mock(|when, then| {
        when.method(Method::POST)
            .path(common::path("users/2/avatar"))
            .header("authorization", "Token tok");
        then.status(200).json_body(json!({"data": {"type": "users", "id": "2"}}));
    });
    let remove = server.mock(|when, then| {
        when.method(Method::DELETE)
            .path(common::path("users/2/avatar"))
            .header("authorization", "Token tok");
        then.status(200).json_body(json!({"data": {"type": "users", "id": "2"}}));
    });
    let confirm = server.mock(|when, then| {
        when.method(Method::POST)
            .path(common::path("users/2"))
            .header("authorization", "Token tok");
        then.status(204);
    });

    let users = common::client(&server).users();

    assert_eq!(users.delete("tok", 2u64).await.unwrap().status.as_u16(), 204);
    assert!(users.upload_avatar("tok", 2u64).await.unwrap().is_success());
    assert!(users.delete_avatar("tok", 2u64).await.unwrap().is_success());
    assert_eq!(
        users
            .send_confirmation_email("tok", 2u64)
            .await
            .unwrap()
            .status
            .as_u16(),
        204
    );

    delete.assert();
    upload.assert();
    remove.assert();
    confirm.assert();
}
