//! API modules.

mod discussion;
mod root;
mod user;

pub use discussion::{
    CreateDiscussionBuilder, DeleteDiscussionBuilder, DiscussionsApi, UpdateDiscussionBuilder,
    DEFAULT_ACTING_USER,
};
pub use root::{RootApi, TokenBuilder};
pub use user::{CreateUserBuilder, UpdateUserBuilder, UsersApi};
