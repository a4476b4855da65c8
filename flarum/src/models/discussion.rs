//! Discussion request models.

use serde::Serialize;

use super::document::Relationship;
use super::TagId;

/// JSON:API resource type for discussions.
pub const DISCUSSIONS: &str = "discussions";

/// JSON:API resource type for tags.
pub const TAGS: &str = "tags";

/// Attributes of a new discussion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDiscussion {
    pub content: String,
    pub title: String,
}

/// Attributes sent when editing a discussion.
///
/// Every field is sent on each update; an unset title goes out as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionChanges {
    pub title: Option<String>,
    pub is_hidden: bool,
    pub is_locked: bool,
    pub is_sticky: bool,
}

/// Relationships of a discussion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscussionRelationships {
    pub tags: Relationship<TagId>,
}

impl DiscussionRelationships {
    /// Tag linkage for the given tag ids.
    pub fn tags(ids: impl IntoIterator<Item = TagId>) -> Self {
        Self {
            tags: Relationship::to_many(TAGS, ids),
        }
    }
}
