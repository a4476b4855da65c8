//! Discussions API.

use std::sync::Arc;

use reqwest::Method;

use crate::{
    client::{ApiResponse, FlarumClientInner},
    error::Result,
    models::{
        DiscussionChanges, DiscussionId, DiscussionRelationships, Document, NewDiscussion,
        Resource, TagId, UserId, DISCUSSIONS,
    },
};

/// User impersonated by master-key calls unless told otherwise.
pub const DEFAULT_ACTING_USER: UserId = UserId(1);

/// API for discussion operations, rooted at `/discussions`.
pub struct DiscussionsApi {
    client: Arc<FlarumClientInner>,
}

impl DiscussionsApi {
    pub(crate) fn new(client: Arc<FlarumClientInner>) -> Self {
        Self { client }
    }

    /// List discussions. The JSON:API envelope is returned untouched.
    pub async fn index(&self) -> Result<ApiResponse> {
        self.client.get(DISCUSSIONS).await
    }

    /// Start a new discussion.
    pub fn create(
        &self,
        token: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> CreateDiscussionBuilder {
        CreateDiscussionBuilder {
            client: self.client.clone(),
            token: token.into(),
            acting_user: DEFAULT_ACTING_USER,
            discussion: NewDiscussion {
                content: content.into(),
                title: title.into(),
            },
            tags: Vec::new(),
        }
    }

    /// Show a single discussion.
    pub async fn show(&self, discussion_id: impl Into<DiscussionId>) -> Result<ApiResponse> {
        let path = discussion_path(discussion_id.into());
        self.client.get(&path).await
    }

    /// Edit a discussion.
    pub fn update(
        &self,
        token: impl Into<String>,
        discussion_id: impl Into<DiscussionId>,
    ) -> UpdateDiscussionBuilder {
        UpdateDiscussionBuilder {
            client: self.client.clone(),
            token: token.into(),
            discussion_id: discussion_id.into(),
            acting_user: DEFAULT_ACTING_USER,
            changes: DiscussionChanges::default(),
            tags: None,
        }
    }

    /// Delete a discussion.
    pub fn delete(
        &self,
        token: impl Into<String>,
        discussion_id: impl Into<DiscussionId>,
    ) -> DeleteDiscussionBuilder {
        DeleteDiscussionBuilder {
            client: self.client.clone(),
            token: token.into(),
            discussion_id: discussion_id.into(),
            acting_user: DEFAULT_ACTING_USER,
        }
    }
}

fn discussion_path(id: DiscussionId) -> String {
    format!("{DISCUSSIONS}/{id}")
}

/// Builder for discussion creation.
pub struct CreateDiscussionBuilder {
    client: Arc<FlarumClientInner>,
    token: String,
    acting_user: UserId,
    discussion: NewDiscussion,
    tags: Vec<TagId>,
}

impl CreateDiscussionBuilder {
    /// Tags to file the discussion under.
    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TagId>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// User to post as.
    pub fn acting_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.acting_user = user_id.into();
        self
    }

    /// Request document this builder sends.
    pub fn document(&self) -> Document<NewDiscussion, DiscussionRelationships> {
        Document::new(
            Resource::new(DISCUSSIONS, self.discussion.clone())
                .with_relationships(DiscussionRelationships::tags(self.tags.iter().copied())),
        )
    }

    /// Execute the request.
    pub async fn send(self) -> Result<ApiResponse> {
        let document = self.document();
        self.client
            .send_json_authed(
                Method::POST,
                DISCUSSIONS,
                &self.token,
                Some(self.acting_user),
                &document,
            )
            .await
    }
}

/// Builder for discussion edits.
pub struct UpdateDiscussionBuilder {
    client: Arc<FlarumClientInner>,
    token: String,
    discussion_id: DiscussionId,
    acting_user: UserId,
    changes: DiscussionChanges,
    tags: Option<Vec<TagId>>,
}

impl UpdateDiscussionBuilder {
    /// User to edit as.
    pub fn acting_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.acting_user = user_id.into();
        self
    }

    /// New title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.changes.title = Some(title.into());
        self
    }

    /// Hide or restore the discussion.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.changes.is_hidden = hidden;
        self
    }

    /// Lock or unlock the discussion.
    pub fn locked(mut self, locked: bool) -> Self {
        self.changes.is_locked = locked;
        self
    }

    /// Stick or unstick the discussion.
    pub fn sticky(mut self, sticky: bool) -> Self {
        self.changes.is_sticky = sticky;
        self
    }

    /// Replace the discussion's tags. An empty list clears them.
    ///
    /// When never called, the tag relationship is left out of the request.
    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TagId>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Request document this builder sends.
    pub fn document(&self) -> Document<DiscussionChanges, DiscussionRelationships> {
        let mut resource =
            Resource::new(DISCUSSIONS, self.changes.clone()).with_id(self.discussion_id);

        if let Some(tags) = &self.tags {
            resource =
                resource.with_relationships(DiscussionRelationships::tags(tags.iter().copied()));
        }

        Document::new(resource)
    }

    /// Execute the request.
    pub async fn send(self) -> Result<ApiResponse> {
        let document = self.document();
        let path = discussion_path(self.discussion_id);
        self.client
            .send_json_authed(
                Method::PATCH,
                &path,
                &self.token,
                Some(self.acting_user),
                &document,
            )
            .await
    }
}

/// Builder for discussion deletion.
pub struct DeleteDiscussionBuilder {
    client: Arc<FlarumClientInner>,
    token: String,
    discussion_id: DiscussionId,
    acting_user: UserId,
}

impl DeleteDiscussionBuilder {
    /// User to delete as.
    pub fn acting_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.acting_user = user_id.into();
        self
    }

    /// Execute the request.
    pub async fn send(self) -> Result<ApiResponse> {
        let path = discussion_path(self.discussion_id);
        self.client
            .send_authed(Method::DELETE, &path, &self.token, Some(self.acting_user))
            .await
    }
}
