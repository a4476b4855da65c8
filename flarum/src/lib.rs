//! Rust client library for the Flarum forum REST API.
//!
//! Every route method issues one request and hands back the status and the
//! parsed JSON body. Non-success statuses are not errors; inspect
//! [`ApiResponse::status`] or opt into [`ApiResponse::error_for_status`].
//!
//! ```no_run
//! # async fn run() -> flarum::Result<()> {
//! let client = flarum::FlarumClient::new("https://forum.example.com/api")?;
//! let response = client
//!     .discussions()
//!     .create("master-key", "Hello", "First post")
//!     .tags([1u64])
//!     .acting_user(1u64)
//!     .send()
//!     .await?;
//! println!("{} {}", response.status, response.body);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod models;

// Re-export main types
pub use client::{
    authorization_header, ApiResponse, Credentials, FlarumClient, FlarumClientBuilder, HttpConfig,
};
pub use error::{Error, Result};

// Re-export commonly used models
pub use models::{DiscussionId, TagId, TokenResponse, UserId};

// Re-export API types
pub use api::{DiscussionsApi, RootApi, UsersApi};
