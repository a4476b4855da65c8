//! Data models for Flarum requests.

mod discussion;
mod document;
mod ids;
mod session;
mod user;

pub use discussion::{
    DiscussionChanges, DiscussionRelationships, NewDiscussion, DISCUSSIONS, TAGS,
};
pub use document::{Document, Relationship, Resource, ResourceIdentifier};
pub use ids::{DiscussionId, TagId, UserId};
pub use session::{ForgotPassword, TokenRequest, TokenResponse};
pub use user::{NewUser, USERS};
