//! Shared helpers for tests against a mock forum.

#![allow(dead_code)]

use flarum::FlarumClient;
use httpmock::MockServer;

/// API root as mounted by a default forum install.
pub const API_ROOT: &str = "/api";

/// Client pointed at the mock server's API root.
pub fn client(server: &MockServer) -> FlarumClient {
    FlarumClient::new(server.url(API_ROOT)).unwrap()
}

/// Absolute mock path for an API route.
pub fn path(route: &str) -> String {
    if route.is_empty() {
        API_ROOT.to_owned()
    } else {
        format!("{API_ROOT}/{route}")
    }
}
